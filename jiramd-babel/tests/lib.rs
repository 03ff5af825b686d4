// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod converter;


#[cfg(test)]
mod story;
