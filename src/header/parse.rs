use super::{
    broadcast_valueunits, check_valuelabels, is_recognized_key, DATA_SIZE_LIMIT, DESC_KEY,
    REQUIRED_KEYS,
};
use crate::prelude::*;
use log::warn;
use std::str::FromStr;

/// Parse the lines of a header, starting with the line after `# Begin: Header`.
///
/// Lines after `# End: Header` are not consumed. Fails with
/// [`ParseError::HeaderUnterminated`] if the lines run out first.
pub fn parse_header_lines<I, S>(lines: I) -> Result<Header, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut raw = RawHeader::default();

    for line in lines {
        if raw.push_line(line.as_ref()) {
            return raw.finish();
        }
    }

    Err(ParseError::HeaderUnterminated)
}

/// Untyped `key: value` pairs collected line by line
#[derive(Debug, Default, Clone)]
pub(crate) struct RawHeader {
    entries: Vec<(String, String)>,
    desc: Vec<String>,
}

impl RawHeader {
    /// Add a single header line. Returns `true` once the `# End: Header` line is reached,
    /// after which [`RawHeader::finish`] should be called.
    pub(crate) fn push_line(&mut self, line: &str) -> bool {
        // `##` starts a comment anywhere on the line
        let line = match line.find("##") {
            Some(idx) => &line[..idx],
            None => line,
        };

        let is_end = line
            .get(..13)
            .map_or(false, |start| start.eq_ignore_ascii_case("# end: header"));
        if is_end {
            return true;
        }

        let line = line.strip_prefix('#').unwrap_or(line);

        // lines without a colon are commentary, such as blank `#` lines
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_lowercase();
            let value = value.trim().to_string();

            if key == DESC_KEY {
                self.desc.push(value);
            } else {
                self.entries.push((key, value));
            }
        }

        false
    }

    /// the value of the last occurrence of `key`
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn value<T: FromStr>(&self, key: &'static str, expected: &'static str) -> Result<T, ParseError> {
        let value = self.get(key).ok_or_else(|| MissingHeaderKeys::new(vec![key]))?;

        value
            .parse()
            .map_err(|_| InvalidHeaderValue::new(key, value.to_string(), expected).into())
    }

    fn float(&self, key: &'static str) -> Result<f64, ParseError> {
        self.value(key, "a floating point number")
    }

    /// integer values are sizes and counts, so zero is not allowed either
    fn count(&self, key: &'static str) -> Result<usize, ParseError> {
        let count: usize = self.value(key, "a positive integer")?;

        if count == 0 {
            return Err(InvalidHeaderValue::new(key, count.to_string(), "a positive integer").into());
        }

        Ok(count)
    }

    fn list(&self, key: &'static str) -> Result<Vec<String>, ParseError> {
        let value = self.get(key).unwrap_or_default();

        shlex::split(value).ok_or_else(|| {
            InvalidHeaderValue::new(key, value.to_string(), "a shell-quoted list").into()
        })
    }

    fn axis_floats(&self, keys: [&'static str; 3]) -> Result<[f64; 3], ParseError> {
        Ok([self.float(keys[0])?, self.float(keys[1])?, self.float(keys[2])?])
    }

    fn axis_counts(&self, keys: [&'static str; 3]) -> Result<[usize; 3], ParseError> {
        Ok([self.count(keys[0])?, self.count(keys[1])?, self.count(keys[2])?])
    }

    /// names of every mandatory key that has not been seen
    fn missing_keys(&self, mesh_type: Option<MeshType>) -> Vec<&'static str> {
        let mesh_keys = mesh_type.map(MeshType::required_keys).unwrap_or_default();

        REQUIRED_KEYS
            .iter()
            .chain(mesh_keys)
            .filter(|key| self.get(key).is_none())
            .copied()
            .collect()
    }

    /// Validate the collected keys and convert them into a typed [`Header`]
    pub(crate) fn finish(self) -> Result<Header, ParseError> {
        let mesh_type = self.get("meshtype").map(str::parse::<MeshType>).transpose()?;

        let missing = self.missing_keys(mesh_type);
        if !missing.is_empty() {
            return Err(MissingHeaderKeys::new(missing).into());
        }

        let unrecognized: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|(key, _)| !is_recognized_key(key))
            .cloned()
            .collect();

        for (key, _) in &unrecognized {
            warn!("`{}` is not a recognized OVF 2.0 header key, ignoring it", key);
        }

        let mesh = match mesh_type {
            Some(MeshType::Rectangular) => Mesh::Rectangular(Rectangular::new(
                self.axis_floats(["xbase", "ybase", "zbase"])?,
                self.axis_floats(["xstepsize", "ystepsize", "zstepsize"])?,
                self.axis_counts(["xnodes", "ynodes", "znodes"])?,
            )),
            Some(MeshType::Irregular) => Mesh::Irregular(Irregular::new(self.count("pointcount")?)),
            // `meshtype` is mandatory, so a missing one was reported above
            None => return Err(MissingHeaderKeys::new(vec!["meshtype"]).into()),
        };

        let bounds = BoundingBox {
            min: self.axis_floats(["xmin", "ymin", "zmin"])?,
            max: self.axis_floats(["xmax", "ymax", "zmax"])?,
        };

        let valuedim = self.count("valuedim")?;
        let valueunits = broadcast_valueunits(self.list("valueunits")?, valuedim)?;
        let valuelabels = check_valuelabels(self.list("valuelabels")?, valuedim)?;

        let header = Header {
            title: self.get("title").unwrap_or_default().to_string(),
            meshunit: self.get("meshunit").unwrap_or_default().to_string(),
            desc: self.desc,
            bounds,
            mesh,
            valuedim,
            valueunits,
            valuelabels,
            unrecognized,
        };

        if header.data_len().is_none() {
            let key = match header.mesh_type() {
                MeshType::Rectangular => "valuedim * xnodes * ynodes * znodes",
                MeshType::Irregular => "(3 + valuedim) * pointcount",
            };
            let value = format!("{:?}", header.data_shape());
            return Err(InvalidHeaderValue::new(key, value, DATA_SIZE_LIMIT).into());
        }

        Ok(header)
    }
}
