//! `${...}` placeholder substitution.
//!
//! A placeholder is `${` up to the next `}`; whatever is between the braces
//! is only a label for humans. Placeholders are filled left to right from
//! the argument list. Once arguments run out the remaining placeholders are
//! kept verbatim. An unterminated `${` is plain text. Extra arguments are
//! ignored.

/// Fill placeholders in `template` from `args`, in order.
pub fn substitute<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(len) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        match args.next() {
            Some(arg) => out.push_str(arg.as_ref()),
            None => out.push_str(&rest[start..start + 2 + len + 1]),
        }
        rest = &after[len + 1..];
    }

    out.push_str(rest);
    out
}

/// Labels of every placeholder, in order.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(len) = after.find('}') else {
            break;
        };
        found.push(&after[..len]);
        rest = &after[len + 1..];
    }
    found
}
