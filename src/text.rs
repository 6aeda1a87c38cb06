//! Commit message normalization

/// Tidy a raw model reply into a commit message
///
/// Carriage returns are dropped and leading/trailing blank lines removed.
/// Without a delimiter the remaining lines keep their newlines, blank
/// separator lines included. With a delimiter, blank lines are dropped and
/// the rest are joined by it, producing a single line as long as the
/// delimiter itself has no line break.
pub fn normalize(text: &str, delimiter: Option<&str>) -> String
{   let cleaned = text.replace('\r', "");
    let lines: Vec<&str> = cleaned.split('\n').collect();

    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    let body = match (start, end)
    {   (Some(s), Some(e)) => &lines[s..=e]
      , _ => return String::new()
    };

    match delimiter
    {   None => body.join("\n")
      , Some(delim) => body
          .iter()
          .map(|l| l.trim_end())
          .filter(|l| !l.is_empty())
          .collect::<Vec<_>>()
          .join(delim)
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn strips_outer_blank_lines_only()
    {   let raw = "\n\n  \nFix: Resolve request racing\n\nIntroduce a request id.\n\n";
        assert_eq!(
          normalize(raw, None)
        , "Fix: Resolve request racing\n\nIntroduce a request id."
        );
    }

    #[test]
    fn delimiter_joins_non_blank_lines()
    {   let raw = "Fix: Resolve request racing\r\n\r\nIntroduce a request id.  \nDismiss stale responses.\n";
        assert_eq!(
          normalize(raw, Some(" "))
        , "Fix: Resolve request racing Introduce a request id. Dismiss stale responses."
        );
    }

    #[test]
    fn blank_reply_normalizes_to_empty()
    {   assert_eq!(normalize(" \n\t\n", None), "");
        assert_eq!(normalize("", Some(";")), "");
    }

    #[test]
    fn normalization_is_idempotent()
    {   let samples = [
          "Feat: Add polish language"
        , "\n\nFix: A\n\nbody line\n\n"
        , "Chore!: Drop support for Node 6\r\n"
        , "  indented first line\nsecond\n"
        ];
        for raw in samples
        {   for delim in [None, Some(" | "), Some("")]
            {   let once = normalize(raw, delim);
                assert_eq!(normalize(&once, delim), once, "raw: {:?}", raw);
            }
        }
    }

    #[test]
    fn single_line_is_untouched()
    {   assert_eq!(
          normalize("Fix: Capitalize port variable name", Some(" "))
        , "Fix: Capitalize port variable name"
        );
    }
}
