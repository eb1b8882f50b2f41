use colored::Colorize;

pub fn show() {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let description = env!("CARGO_PKG_DESCRIPTION");

    println!("{} v{}", name.bright_green(), version.bright_white());
    println!("{}", description);
}
