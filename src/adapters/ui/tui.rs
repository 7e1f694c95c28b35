//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Session gate (sign in / sign up), then the main menu: analyze a photo,
//! show the profile, sign out.

use super::{progress, render};
use crate::domain::{DomainError, User};
use crate::ports::InputPort;
use crate::usecases::{AnalysisService, SessionService};
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const SIGN_IN: &str = "Sign in";
const SIGN_UP: &str = "Create account";
const ANALYZE: &str = "Analyze a meal photo";
const PROFILE: &str = "Profile";
const SIGN_OUT: &str = "Sign out";
const QUIT: &str = "Quit";

/// Apply the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("🍽").with_fg(Color::LightGreen))
        .with_highlighted_option_prefix(Styled::new("➜").with_fg(Color::LightRed))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

/// Strip surrounding whitespace and quotes (terminals quote dropped files).
fn clean_path_input(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);
    PathBuf::from(unquoted)
}

/// Esc / Ctrl+C map to `None` so the caller can back out.
fn prompt_result<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn ask_password(label: &str) -> Result<Option<String>, DomainError> {
    prompt_result(
        Password::new(label)
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt(),
    )
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    analysis: Arc<AnalysisService>,
    session: Arc<SessionService>,
    provider_label: String,
}

impl TuiInputPort {
    pub fn new(
        analysis: Arc<AnalysisService>,
        session: Arc<SessionService>,
        provider_label: String,
    ) -> Self {
        Self {
            analysis,
            session,
            provider_label,
        }
    }

    /// Returns the signed-in user, or `None` if the user chose to quit.
    async fn session_gate(&self) -> Result<Option<User>, DomainError> {
        if let Some(user) = self.session.current_user().await? {
            println!("Welcome back, {}!", user.name);
            return Ok(Some(user));
        }

        loop {
            let Some(choice) =
                prompt_result(Select::new("Welcome", vec![SIGN_IN, SIGN_UP, QUIT]).prompt())?
            else {
                return Ok(None);
            };

            let attempt = match choice {
                SIGN_IN => self.sign_in().await,
                SIGN_UP => self.sign_up().await,
                _ => return Ok(None),
            };

            match attempt {
                Ok(Some(user)) => {
                    println!("Signed in as {}.", user.name);
                    return Ok(Some(user));
                }
                Ok(None) => continue,
                Err(DomainError::Auth(msg)) => println!("⚠  {}", msg),
                Err(e) => return Err(e),
            }
        }
    }

    async fn sign_in(&self) -> Result<Option<User>, DomainError> {
        let Some(email) = prompt_result(Text::new("Email:").prompt())? else {
            return Ok(None);
        };
        let Some(password) = ask_password("Password:")? else {
            return Ok(None);
        };
        self.session.login(&email, &password).await.map(Some)
    }

    async fn sign_up(&self) -> Result<Option<User>, DomainError> {
        let Some(name) = prompt_result(Text::new("Full name:").prompt())? else {
            return Ok(None);
        };
        let Some(email) = prompt_result(Text::new("Email:").prompt())? else {
            return Ok(None);
        };
        let Some(password) = ask_password("Password:")? else {
            return Ok(None);
        };
        let Some(confirm) = ask_password("Confirm password:")? else {
            return Ok(None);
        };
        self.session
            .signup(&name, &email, &password, &confirm)
            .await
            .map(Some)
    }

    async fn analyze_photo(&self) -> Result<(), DomainError> {
        let Some(input) = prompt_result(
            Text::new("Path to meal photo:")
                .with_help_message("jpg, png, webp, gif or heic")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let path = clean_path_input(&input);

        let pb = progress::spinner(&format!("Analyzing with {}", self.provider_label));
        let outcome = self.analysis.analyze_file(&path).await;
        pb.finish_and_clear();

        if outcome.is_error() {
            warn!(path = %path.display(), "analysis returned an error outcome");
        }
        println!("\n{}", render::render_outcome(&outcome));
        Ok(())
    }

    fn show_profile(user: &User) {
        println!("\n{}", user.name);
        println!("  Email:        {}", user.email);
        println!(
            "  Member since: {}\n",
            user.created_at.format("%Y-%m-%d")
        );
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let Some(mut user) = self.session_gate().await? else {
            return Ok(());
        };

        loop {
            let Some(choice) = prompt_result(
                Select::new("What next?", vec![ANALYZE, PROFILE, SIGN_OUT, QUIT]).prompt(),
            )?
            else {
                return Ok(());
            };

            match choice {
                ANALYZE => self.analyze_photo().await?,
                PROFILE => Self::show_profile(&user),
                SIGN_OUT => {
                    let confirm = prompt_result(
                        inquire::Confirm::new("Sign out?").with_default(true).prompt(),
                    )?;
                    if confirm != Some(true) {
                        continue;
                    }
                    self.session.logout().await?;
                    println!("Signed out.");
                    match self.session_gate().await? {
                        Some(next) => user = next,
                        None => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_input() {
        assert_eq!(clean_path_input("  /tmp/a.jpg \n"), PathBuf::from("/tmp/a.jpg"));
        assert_eq!(
            clean_path_input("'/tmp/my lunch.png'"),
            PathBuf::from("/tmp/my lunch.png")
        );
        assert_eq!(clean_path_input("\"b.webp\""), PathBuf::from("b.webp"));
    }
}
