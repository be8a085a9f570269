//! GenBank flat-file fragments: feature table lines and the ORIGIN block.

pub const FEATURES_HEADER: &str = "FEATURES            Location/Qualifiers";

const LOCATION_INDENT: usize = 5;
const FEATURE_KEY_WIDTH: usize = 16;
const QUALIFIER_INDENT: usize = 21;
const QUALIFIER_WIDTH: usize = 58;
const ORIGIN_LINE_BASES: usize = 60;
const ORIGIN_GROUP_BASES: usize = 10;

pub fn location_line(feature_type: &str, location: &str) -> String {
    format!(
        "{:indent$}{feature_type:<key_width$}{location}",
        "",
        indent = LOCATION_INDENT,
        key_width = FEATURE_KEY_WIDTH,
    )
}

/// `/key="value"` wrapped at 58 columns and indented into the qualifier column.
pub fn qualifier_lines(key: &str, value: &str) -> Vec<String> {
    let whole = format!("/{key}=\"{value}\"");
    wrap(&whole, QUALIFIER_WIDTH)
        .into_iter()
        .map(|line| format!("{:indent$}{line}", "", indent = QUALIFIER_INDENT))
        .collect()
}

pub fn feature_lines<K, V>(feature_type: &str, location: &str, qualifiers: &[(K, V)]) -> Vec<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut lines = vec![location_line(feature_type, location)];
    for (key, value) in qualifiers {
        lines.extend(qualifier_lines(key.as_ref(), value.as_ref()));
    }
    lines
}

/// A `gene` feature followed by a `CDS` feature over the same span. A head
/// position past the tail position marks the complement strand.
pub fn gene_cds_lines<K, V>(head: usize, tail: usize, qualifiers: &[(K, V)]) -> Vec<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let gene: &str = qualifiers
        .iter()
        .find(|(key, _)| {
            let key: &str = key.as_ref();
            key == "gene"
        })
        .map_or("?", |(_, value)| value.as_ref());
    let location = if head < tail {
        format!("{head}..{tail}")
    } else {
        format!("complement({tail}..{head})")
    };
    let mut lines = feature_lines("gene", &location, &[("gene", gene)]);
    lines.extend(feature_lines("CDS", &location, qualifiers));
    lines
}

/// `ORIGIN` block: 60 bases per line in groups of 10, each line prefixed by
/// the 1-based position of its first base, closed by `//` and an empty line.
pub fn origin_lines(seq: &str) -> Vec<String> {
    let mut lines = vec!["ORIGIN".to_string()];
    for (index, line) in seq.as_bytes().chunks(ORIGIN_LINE_BASES).enumerate() {
        let groups: Vec<String> = line
            .chunks(ORIGIN_GROUP_BASES)
            .map(|group| String::from_utf8_lossy(group).into_owned())
            .collect();
        let position = index * ORIGIN_LINE_BASES + 1;
        lines.push(format!("{position:>9} {}", groups.join(" ")));
    }
    lines.push("//".to_string());
    lines.push(String::new());
    lines
}

/// Greedy word wrap; words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        let mut word = word;
        while word.len() > width {
            let split = floor_char_boundary(word, width);
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        if !word.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    // always make progress, even on a character wider than the line
    if index == 0 {
        s.chars().next().map_or(0, char::len_utf8)
    } else {
        index
    }
}
