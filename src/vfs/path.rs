//! Pure path-string helpers. Nothing here touches the tree; the engine
//! feeds the results of `split_dir_and_name` into its resolver.

/// Names that can never be a file name of their own.
const RESERVED_NAMES: [&str; 2] = [".", ".."];

/// Splits a path into its directory part and an optional trailing name.
///
/// The same split decides where a new file goes and how a move/copy
/// target is interpreted. Total: every input produces a result.
///
/// * `.` and `..` pass through unchanged, with no name part.
/// * An absolute path keeps its leading `/` in the directory part.
/// * A trailing slash, or a reserved (`.`/`..`) last component, makes the
///   whole path directory-only: no name part.
/// * Otherwise the last component is the name and the remaining
///   components (empty ones dropped) join into the directory part, which
///   falls back to `.` when nothing is left of it.
///
/// ```
/// use treefs_kit::split_dir_and_name;
///
/// assert_eq!(split_dir_and_name("a/b/c"), ("a/b".to_string(), Some("c".to_string())));
/// assert_eq!(split_dir_and_name("/c"), ("/".to_string(), Some("c".to_string())));
/// assert_eq!(split_dir_and_name("a/b/"), ("a/b".to_string(), None));
/// assert_eq!(split_dir_and_name("c"), (".".to_string(), Some("c".to_string())));
/// ```
pub fn split_dir_and_name(path: &str) -> (String, Option<String>) {
    if path == "." || path == ".." {
        return (path.to_string(), None);
    }

    let components: Vec<&str> = path.split('/').collect();

    let (dir_components, name): (&[&str], Option<String>) = match components.split_last() {
        Some((&last, _)) if last.is_empty() || RESERVED_NAMES.contains(&last) => {
            (&components[..], None)
        }
        Some((&last, rest)) => (rest, Some(last.to_string())),
        // split() yields at least one component
        None => (&components[..], None),
    };

    let joined = dir_components
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    let mut dir = String::new();
    if path.starts_with('/') {
        dir.push('/');
    }
    dir.push_str(&joined);
    if dir.is_empty() {
        dir.push('.');
    }

    (dir, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(path: &str) -> (String, Option<String>) {
        split_dir_and_name(path)
    }

    #[test]
    fn test_relative_file() {
        assert_eq!(parsed("note.txt"), (".".into(), Some("note.txt".into())));
    }

    #[test]
    fn test_nested_file() {
        assert_eq!(parsed("a/b/c"), ("a/b".into(), Some("c".into())));
    }

    #[test]
    fn test_absolute_file() {
        assert_eq!(parsed("/a/b"), ("/a".into(), Some("b".into())));
        assert_eq!(parsed("/b"), ("/".into(), Some("b".into())));
    }

    #[test]
    fn test_trailing_slash_is_directory_only() {
        assert_eq!(parsed("a/b/"), ("a/b".into(), None));
        assert_eq!(parsed("/a/"), ("/a".into(), None));
    }

    #[test]
    fn test_reserved_last_component_is_directory_only() {
        assert_eq!(parsed("a/.."), ("a/..".into(), None));
        assert_eq!(parsed("a/."), ("a/.".into(), None));
    }

    #[test]
    fn test_dot_and_dotdot_pass_through() {
        assert_eq!(parsed("."), (".".into(), None));
        assert_eq!(parsed(".."), ("..".into(), None));
    }

    #[test]
    fn test_root() {
        assert_eq!(parsed("/"), ("/".into(), None));
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(parsed(""), (".".into(), None));
    }

    #[test]
    fn test_empty_components_filtered() {
        assert_eq!(parsed("a//b//c"), ("a/b".into(), Some("c".into())));
        assert_eq!(parsed("//a//b"), ("/a".into(), Some("b".into())));
    }

    /// A trailing non-empty, non-reserved component always splits off as
    /// the name, and the directory part is the path without it.
    #[test]
    fn test_round_trip() {
        for (dir, name) in [("docs", "x"), ("/docs/work", "y.txt"), (".", "z")] {
            let path = format!("{dir}/{name}");
            assert_eq!(parsed(&path), (dir.to_string(), Some(name.to_string())));
        }
    }
}
