const FASTA_EXTENSIONS: [&str; 7] = ["fa", "fas", "fasta", "fna", "ffn", "faa", "frn"];

/// Wraps the leading whitespace-free key of a comment:
/// `(prefix)key(suffix) rest of description`.
pub fn fix_comment(comment: &str, prefix: &str, suffix: &str) -> String {
    let key_len = comment
        .find(char::is_whitespace)
        .unwrap_or(comment.len());
    if key_len == 0 {
        return comment.to_string();
    }
    let (key, rest) = comment.split_at(key_len);
    format!("{prefix}{key}{suffix}{rest}")
}

/// Drops a trailing FASTA extension and wraps what is left:
/// `(prefix)N2700.contigs(suffix)` for `N2700.contigs.fa`.
pub fn fix_filename(name: &str, prefix: &str, suffix: &str) -> String {
    let stem = name
        .rsplit_once('.')
        .filter(|(_, ext)| FASTA_EXTENSIONS.contains(ext))
        .map_or(name, |(stem, _)| stem);
    format!("{prefix}{stem}{suffix}")
}

/// First name containing `keyword` (case-insensitive) as a token, i.e.
/// bounded on each side by a non-alphanumeric character or the string end.
pub fn match_contig_name<'a, I>(names: I, keyword: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let keyword = keyword.to_lowercase();
    names
        .into_iter()
        .find(|name| contains_token(&name.to_lowercase(), &keyword))
}

fn contains_token(haystack: &str, keyword: &str) -> bool {
    haystack.match_indices(keyword).any(|(start, found)| {
        let end = start + found.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_ascii_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphanumeric());
        before_ok && after_ok
    })
}
