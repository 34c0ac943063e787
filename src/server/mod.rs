// Server module entry point
// Provides listener construction, the accept loop, and signal handling

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword and cannot name a module, so loop.rs maps to server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use listener::create_listener;
pub use server_loop::Server;
pub use signal::start_signal_handler;
