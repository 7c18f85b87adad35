use std::io::Write;

/// Operator confirmation for destructive bulk actions.
///
/// A trait so tests can stub the answer instead of reading real stdin.
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Blocking stdin-backed confirmation. There is no timeout; the process waits
/// until the operator answers.
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt}");
        let _ = std::io::stdout().flush();

        let mut reply = String::new();
        if std::io::stdin().read_line(&mut reply).is_err() {
            return false;
        }
        is_affirmative(&reply)
    }
}

/// Only a lone `y` or `Y` counts as approval; anything else is a decline.
fn is_affirmative(reply: &str) -> bool {
    reply.trim().eq_ignore_ascii_case("y")
}
