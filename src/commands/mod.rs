pub mod input;
pub mod lines;
pub mod outline;
pub mod progress;
pub mod sections;
pub mod specs;
pub mod status;
pub mod window;

#[cfg(test)]
mod tests;
