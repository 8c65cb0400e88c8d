mod front_matter;
mod post;
mod read_time;

pub use self::{
    front_matter::FrontMatter,
    post::{Author, BlogPost, create_slug, sort_by_date_desc},
    read_time::{WORDS_PER_MINUTE, read_time_minutes},
};
