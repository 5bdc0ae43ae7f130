use anyhow::{bail, Result};
use std::io::BufRead;

/// Reads one line and requires it to equal `token` exactly. Anything
/// else, including EOF, declines.
pub fn confirmed<R: BufRead>(mut reader: R, token: &str) -> bool {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => line.trim_end_matches(['\r', '\n']) == token,
    }
}

/// Gate before a destructive bulk action: prints the prompt, then aborts
/// with an error (hence a non-zero exit, zero mutations) unless the
/// operator types the exact token.
pub fn confirm_or_abort(prompt: &str, token: &str) -> Result<()> {
    println!("{prompt}");
    println!("type {token} to proceed:");
    if confirmed(std::io::stdin().lock(), token) {
        Ok(())
    } else {
        bail!("aborted, no changes made");
    }
}

#[cfg(test)]
mod tests {
    use super::confirmed;
    use std::io::Cursor;

    #[test]
    fn exact_token_confirms() {
        assert!(confirmed(Cursor::new("affirmative\n"), "affirmative"));
        assert!(confirmed(Cursor::new("yes"), "yes"));
    }

    #[test]
    fn anything_else_declines() {
        assert!(!confirmed(Cursor::new("Affirmative\n"), "affirmative"));
        assert!(!confirmed(Cursor::new("affirmative!\n"), "affirmative"));
        assert!(!confirmed(Cursor::new("y\n"), "yes"));
        assert!(!confirmed(Cursor::new(""), "yes"));
        assert!(!confirmed(Cursor::new(" yes\n"), "yes"));
    }
}
