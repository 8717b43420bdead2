pub mod core;
pub mod registry;
pub mod renderer;
pub mod resolver;
pub mod scanner;

pub use self::core::*;
pub use self::registry::*;
pub use self::renderer::*;
pub use self::resolver::*;
pub use self::scanner::*;
