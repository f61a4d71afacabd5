pub mod aggregate;
pub mod command;
pub mod fileformat;
pub mod matching;
pub mod params;
pub mod refmodel;
pub mod utils;

pub use params::DemuxParams;
pub use refmodel::RefModel;
