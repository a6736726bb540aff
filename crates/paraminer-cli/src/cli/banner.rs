//! Startup banner (stderr, so stdout stays URLs only).

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

const ART: &str = r"
                                 _
   ___  ___ ________ ___ _  (_)__  ___ ____
  / _ \/ _ `/ __/ _ `/  ' \/ / _ \/ -_) __/
 / .__/\_,_/_/  \_,_/_/_/_/_/_//_/\__/_/
/_/
";

pub fn print_banner() {
    eprintln!("{}{}{}", YELLOW, ART, RESET);
    eprintln!(
        "                      {}v{}{}\n",
        YELLOW,
        env!("CARGO_PKG_VERSION"),
        RESET
    );
}
