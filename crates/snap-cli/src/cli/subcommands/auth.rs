use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Login(CredentialArgs),
    /// Create an account and sign in.
    Signup(CredentialArgs),
    /// Sign out and forget the stored session.
    Logout(LogoutArgs),
    /// Show the signed-in identity.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct CredentialArgs {
    #[arg(long)]
    pub email: String,
    /// Password (read from stdin when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct LogoutArgs {
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}
