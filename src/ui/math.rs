//! Turns the TeX and HTML fragments used in the datasets into plain
//! terminal text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static HTML_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p>").expect("static pattern"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static pattern"));
static FRAC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\[dt]?frac\{([^{}]*)\}\{([^{}]*)\}").expect("static pattern")
});
static BINOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\binom\{([^{}]*)\}\{([^{}]*)\}").expect("static pattern")
});
static SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\^_])(?:\{([^{}]*)\}|([A-Za-z0-9]))").expect("static pattern")
});
static TEXT_CMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:text|mathrm|mathbf|operatorname)\{([^{}]*)\}").expect("static pattern")
});
/// A `$...$` span whose body neither starts nor ends with whitespace and
/// whose closing dollar is not followed by a digit. Lone currency signs
/// such as `R$ 10` never pair up.
static INLINE_MATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([^$\s](?:[^$]*[^$\s])?)\$(\D|$)").expect("static pattern")
});
static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("static pattern"));

/// Order matters: a command must come before any command that is its prefix.
const SYMBOLS: &[(&str, &str)] = &[
    ("\\cdots", "⋯"),
    ("\\ldots", "…"),
    ("\\dots", "…"),
    ("\\cdot", "·"),
    ("\\times", "×"),
    ("\\div", "÷"),
    ("\\leq", "≤"),
    ("\\geq", "≥"),
    ("\\neq", "≠"),
    ("\\left", ""),
    ("\\rightarrow", "→"),
    ("\\right", ""),
    ("\\le", "≤"),
    ("\\ge", "≥"),
    ("\\notin", "∉"),
    ("\\infty", "∞"),
    ("\\in", "∈"),
    ("\\subseteq", "⊆"),
    ("\\subset", "⊂"),
    ("\\cup", "∪"),
    ("\\cap", "∩"),
    ("\\emptyset", "∅"),
    ("\\to", "→"),
    ("\\Rightarrow", "⇒"),
    ("\\pm", "±"),
    ("\\sum", "Σ"),
    ("\\prod", "Π"),
    ("\\quad", "  "),
    ("\\,", " "),
    ("\\;", " "),
    ("\\!", ""),
    ("\\{", "{"),
    ("\\}", "}"),
];

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '(' => '⁽',
        ')' => '⁾',
        'n' => 'ⁿ',
        'i' => 'ⁱ',
        'p' => 'ᵖ',
        'k' => 'ᵏ',
        'r' => 'ʳ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'o' => 'ₒ',
        'x' => 'ₓ',
        'h' => 'ₕ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'p' => 'ₚ',
        's' => 'ₛ',
        't' => 'ₜ',
        _ => return None,
    })
}

/// Map a script body to Unicode scripts, or spell it out when some
/// character has no script form.
fn script(marker: &str, body: &str) -> String {
    let map: fn(char) -> Option<char> = if marker == "^" { superscript } else { subscript };
    let mapped: Option<String> = body
        .chars()
        .map(|c| if c == ',' || c == ' ' { Some(c) } else { map(c) })
        .collect();
    match mapped {
        Some(s) => s,
        None if marker == "^" => format!("^({body})"),
        None => format!("({body})"),
    }
}

fn wrap(term: &str) -> String {
    let term = term.trim();
    if term.chars().all(|c| c.is_alphanumeric() || c == '!') {
        term.to_string()
    } else {
        format!("({term})")
    }
}

/// Render dataset rich text for the terminal.
pub fn render_text(input: &str) -> String {
    let mut text = HTML_BREAK.replace_all(input, "\n").into_owned();
    text = HTML_TAG.replace_all(&text, "").into_owned();
    for (entity, plain) in ENTITIES {
        text = text.replace(entity, plain);
    }

    for delim in ["$$", "\\[", "\\]", "\\(", "\\)"] {
        text = text.replace(delim, "");
    }
    text = INLINE_MATH.replace_all(&text, "${1}${2}").into_owned();

    text = TEXT_CMD.replace_all(&text, "$1").into_owned();
    for (cmd, symbol) in SYMBOLS {
        text = text.replace(cmd, symbol);
    }

    // Innermost fractions first; repeat to unwind nesting.
    loop {
        let next = FRAC
            .replace_all(&text, |c: &Captures| format!("{}/{}", wrap(&c[1]), wrap(&c[2])))
            .into_owned();
        let next = BINOM
            .replace_all(&next, |c: &Captures| format!("C({},{})", c[1].trim(), c[2].trim()))
            .into_owned();
        if next == text {
            break;
        }
        text = next;
    }

    text = SCRIPT
        .replace_all(&text, |c: &Captures| {
            let body = c.get(2).or_else(|| c.get(3)).map_or("", |m| m.as_str());
            script(&c[1], body)
        })
        .into_owned();

    text.lines()
        .map(|line| SPACES.replace_all(line.trim(), " ").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(render_text("Quantos anagramas?"), "Quantos anagramas?");
    }

    #[test]
    fn delimiters_are_removed() {
        assert_eq!(render_text("$4! = 24$"), "4! = 24");
        assert_eq!(render_text("$$P_n = n!$$"), "Pₙ = n!");
        assert_eq!(render_text("\\(x\\)"), "x");
    }

    #[test]
    fn fractions_and_binomials() {
        assert_eq!(render_text("$\\frac{6!}{3!\\,2!}$"), "6!/(3! 2!)");
        assert_eq!(render_text("$\\binom{n}{p}$"), "C(n,p)");
        assert_eq!(render_text("$\\frac{\\frac{a}{b}}{c}$"), "(a/b)/c");
    }

    #[test]
    fn scripts_map_to_unicode() {
        assert_eq!(render_text("$2^n$"), "2ⁿ");
        assert_eq!(render_text("$26^3$"), "26³");
        assert_eq!(render_text("$A_{10,2}$"), "A₁₀,₂");
        assert_eq!(render_text("$P_n^{a,b}$"), "Pₙ^(a,b)");
        assert_eq!(render_text("$C_{n+p-1,\\,p}$"), "Cₙ₊ₚ₋₁, ₚ");
    }

    #[test]
    fn symbols_are_replaced() {
        assert_eq!(render_text("$m \\cdot n$"), "m · n");
        assert_eq!(render_text("$n \\cdot (n-1) \\cdots 1$"), "n · (n-1) ⋯ 1");
        assert_eq!(render_text("$a \\in A$"), "a ∈ A");
        assert_eq!(render_text("$n \\to \\infty$"), "n → ∞");
    }

    #[test]
    fn no_symbol_shadows_a_later_one() {
        for (i, (earlier, _)) in SYMBOLS.iter().enumerate() {
            for (later, _) in &SYMBOLS[i + 1..] {
                assert!(
                    !later.starts_with(earlier),
                    "{earlier} replaces the start of {later}"
                );
            }
        }
    }

    #[test]
    fn currency_dollars_survive() {
        assert_eq!(render_text("Custa R$ 10 e R$ 20"), "Custa R$ 10 e R$ 20");
        assert_eq!(render_text("R$10 ou R$20"), "R$10 ou R$20");
        assert_eq!(render_text("Total: $n!$ e R$ 5"), "Total: n! e R$ 5");
    }

    #[test]
    fn html_is_stripped() {
        assert_eq!(
            render_text("<b>Resposta:</b> 10<br>Veja &amp; confira"),
            "Resposta: 10\nVeja & confira"
        );
    }

    #[test]
    fn text_commands_keep_content() {
        assert_eq!(render_text("$\\text{total} = 5$"), "total = 5");
    }
}
