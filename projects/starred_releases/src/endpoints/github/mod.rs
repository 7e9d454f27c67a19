pub mod starred_releases;
