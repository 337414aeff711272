pub mod apply;
pub mod init;
pub mod new;
pub mod show;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use new::{new, NewArgs};
pub use show::{show, ShowArgs};
