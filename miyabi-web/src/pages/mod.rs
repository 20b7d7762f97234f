pub mod intro;
pub mod locations;
pub mod prizes;
pub mod scanner;
pub mod stamp_book;

pub use intro::IntroPage;
pub use locations::LocationsPage;
pub use prizes::PrizesPage;
pub use scanner::ScannerPage;
pub use stamp_book::StampBookPage;
