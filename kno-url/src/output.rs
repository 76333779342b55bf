// Status-prefixed console lines

use colored::Colorize;
use std::fmt::Display;

pub fn info(msg: impl Display) {
    println!("{} {}", "[*]".cyan().bold(), msg);
}

pub fn warn(msg: impl Display) {
    println!("{} {}", "[!]".yellow().bold(), msg);
}

pub fn error(msg: impl Display) {
    eprintln!("{} {}", "[-]".red().bold(), msg);
}

pub fn success(msg: impl Display) {
    println!("{} {}", "[+]".green().bold(), msg);
}
