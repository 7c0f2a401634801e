mod catalog;
mod media;

pub use catalog::RemoteCatalog;
pub use media::MediaStore;
