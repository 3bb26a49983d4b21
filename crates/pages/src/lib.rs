mod author;
mod detail;
mod home;
mod traits;

#[cfg(test)]
mod testing;

pub use author::{load_author_page, AuthorProfile, AuthorState};
pub use detail::{
    DetailSession, LoadTicket, Navigation, PostDetail, PostDetailPage, RouteChange,
    SubmitOutcome, SubmitRejected, SubmitTicket, SUBMIT_OK,
};
pub use home::{load_home, HomeState};
pub use traits::BlogSource;
