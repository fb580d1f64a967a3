use super::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Resolves user ids into authorization-bearing profiles")]
pub struct Cli {
    /// Settings file, defaults to `settings/dev.toml` (`settings/release.toml` in release builds).
    #[arg(long)]
    pub settings: Option<String>,

    /// Overrides `http.address` from the settings file.
    #[arg(long)]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "profile-resolver",
            "--settings",
            "settings/release.toml",
            "--address",
            "127.0.0.1:9000",
        ]);
        assert_eq!(cli.settings.as_deref(), Some("settings/release.toml"));
        assert_eq!(cli.address.as_deref(), Some("127.0.0.1:9000"));
    }
}
