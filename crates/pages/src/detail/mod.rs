mod session;
mod state;

pub use session::{DetailSession, Navigation};
pub use state::{
    LoadTicket, PostDetail, PostDetailPage, RouteChange, SubmitOutcome, SubmitRejected,
    SubmitTicket, SUBMIT_OK,
};
