pub mod main;
#[cfg(test)]
mod tests;
