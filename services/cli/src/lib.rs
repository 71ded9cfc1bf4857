mod cli;
mod commands;
mod render;

use finops_maturity::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
