mod authors;
mod comments;
mod posts;
