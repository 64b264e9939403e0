pub mod draw;
pub mod version;

pub use draw::Draw;
pub use version::Version;
