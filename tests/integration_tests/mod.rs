mod cli;
mod errors;
