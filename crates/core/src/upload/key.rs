//! Object key generation.

use rand::Rng;

const TOKEN_LEN: usize = 10;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Splits a file name at the last `.` of its final path segment.
///
/// `.pdf` is an empty stem with extension `pdf`. A trailing dot is dropped
/// and yields no extension.
#[must_use]
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    let segment_start = name.rfind('/').map_or(0, |i| i + 1);
    let segment = &name[segment_start..];

    match segment.rfind('.') {
        None => (name, None),
        Some(dot) if dot + 1 == segment.len() => (&name[..segment_start + dot], None),
        Some(dot) => {
            let split = segment_start + dot;
            (&name[..split], Some(&name[split + 1..]))
        }
    }
}

/// Builds `<stem>_<unixMillis>_<token>[.<ext>]` for an original file name.
///
/// Two calls with the same input differ in the timestamp or the token.
#[must_use]
pub fn generate_file_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let token = random_token(&mut rand::rng());
    compose(original_name, millis, &token)
}

/// Joins root, folder and name with `/`, skipping empty segments.
#[must_use]
pub fn object_key(root: &str, folder: &str, name: &str) -> String {
    [root, folder, name]
        .iter()
        .map(|segment| segment.trim_matches('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn compose(original_name: &str, millis: i64, token: &str) -> String {
    let (stem, ext) = split_extension(original_name);
    let stem = sanitize(stem);

    match ext.map(sanitize) {
        Some(ext) => format!("{stem}_{millis}_{token}.{ext}"),
        None => format!("{stem}_{millis}_{token}"),
    }
}

fn random_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TOKEN_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect()
}

/// Path separators and control characters become `_`; a generated name is
/// always a single key segment.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if is_unsafe(c) { '_' } else { c })
        .collect()
}

fn is_unsafe(c: char) -> bool {
    c == '/' || c == '\\' || c.is_control()
}
