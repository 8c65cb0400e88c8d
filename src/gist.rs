mod client;
mod link;
mod model;

pub use self::{
    client::GistClient,
    link::next_page_url,
    model::{GistFile, GistOwner, GistRecord},
};
