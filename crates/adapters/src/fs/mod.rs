mod clock;
mod scanner;
mod transfer;

pub use clock::SystemClock;
pub use scanner::WalkdirFileScanner;
pub use transfer::{local_date, FsFileTransfer};
