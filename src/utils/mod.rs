//! String helpers shared by the configuration and the reader

/// `Some` only when the value contains something other than whitespace
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated list, trimming entries and dropping blank ones
pub fn split_comma_list(list: &str) -> Vec<String> {
    list.trim()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prefix a path with "/" when it does not already start with one
pub fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Join path fragments with single "/" separators. The result always
/// starts with "/" and never ends with one, except for the root path.
pub fn join_paths(parts: &[Option<&str>]) -> String {
    let segments: Vec<&str> = parts
        .iter()
        .flatten()
        .copied()
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect();

    format!("/{}", segments.join("/"))
}

/// Replace templated segments carrying a regex, e.g. `{id: [0-9]+}`, with
/// the bare parameter name `{id}`
pub fn strip_path_regex(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '{' {
            result.push(c);
            continue;
        }

        // Collect up to the matching close brace; regexes may nest braces.
        let mut depth = 1;
        let mut inner = String::new();
        for next in chars.by_ref() {
            match next {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            inner.push(next);
        }

        let name = inner.split(':').next().unwrap_or_default().trim();
        result.push('{');
        result.push_str(name);
        result.push('}');
    }

    result
}
