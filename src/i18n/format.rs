//! printf-style placeholder filling for translation strings.
//!
//! Catalog texts carry `%v`, `%s` or `%d` placeholders that are filled in
//! order with preformatted arguments; `%%` yields a literal percent sign.
//! Missing arguments leave the placeholder in place.

pub fn fill_placeholders(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(verb @ ('v' | 's' | 'd')) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('%');
                        out.push(verb);
                    }
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
