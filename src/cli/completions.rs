//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::args::Cli;

/// Print completion script for the requested shell to stdout.
pub fn print(shell: Shell) {
    write_to(shell, &mut io::stdout());
}

/// Write the completion script for `shell` to `out`.
pub fn write_to<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        write_to(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("tubenotes"));
        assert!(script.contains("summarize"));
    }
}
