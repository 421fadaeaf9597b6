//! Greek letter names used by the letter-based notations.

const LETTERS: &[(char, &str)] = &[
    ('α', "alpha"),
    ('β', "beta"),
    ('γ', "gamma"),
    ('δ', "delta"),
    ('ε', "epsilon"),
    ('ζ', "zeta"),
    ('η', "eta"),
    ('θ', "theta"),
    ('ι', "iota"),
    ('κ', "kappa"),
    ('λ', "lambda"),
    ('μ', "mu"),
    ('ν', "nu"),
    ('ξ', "xi"),
    ('π', "pi"),
    ('ρ', "rho"),
    ('σ', "sigma"),
    ('τ', "tau"),
    ('υ', "upsilon"),
    ('φ', "phi"),
    ('χ', "chi"),
    ('ψ', "psi"),
    ('ω', "omega"),
    ('Γ', "Gamma"),
    ('Δ', "Delta"),
    ('∆', "Delta"),
    ('Θ', "Theta"),
    ('Λ', "Lambda"),
    ('Ξ', "Xi"),
    ('Π', "Pi"),
    ('Σ', "Sigma"),
    ('Υ', "Upsilon"),
    ('Φ', "Phi"),
    ('Ψ', "Psi"),
    ('Ω', "Omega"),
];

/// Name of a Greek letter, if `ch` is one.
pub fn name_of(ch: char) -> Option<&'static str> {
    LETTERS.iter().find(|(c, _)| *c == ch).map(|(_, name)| *name)
}

/// Replace each Greek letter with `\name` (followed by a space when a letter follows).
pub fn to_latex(text: &str) -> String {
    replace(text, "\\")
}

/// Replace each Greek letter with its plain name.
pub fn to_python(text: &str) -> String {
    replace(text, "")
}

fn replace(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match name_of(ch) {
            Some(name) => {
                out.push_str(prefix);
                out.push_str(name);
                let letter_follows = chars.peek().is_some_and(|c| c.is_ascii_alphabetic());
                if letter_follows {
                    out.push(if prefix.is_empty() { '_' } else { ' ' });
                }
            }
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_letters_unchanged() {
        assert_eq!(to_latex("x"), "x");
        assert_eq!(to_python("abc"), "abc");
    }

    #[test]
    fn test_greek() {
        assert_eq!(to_latex("α"), "\\alpha");
        assert_eq!(to_python("α"), "alpha");
        assert_eq!(to_latex("Δ"), "\\Delta");
        assert_eq!(to_latex("∆"), "\\Delta");
    }

    #[test]
    fn test_greek_followed_by_letter() {
        assert_eq!(to_latex("πr"), "\\pi r");
        assert_eq!(to_python("πr"), "pi_r");
    }
}
