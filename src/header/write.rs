use crate::prelude::*;
use crate::utils::format_float;
use crate::write_ovf::InvalidHeaderText;
use std::fmt::Write as _;

impl Header {
    /// Render the file preamble and header in the fixed OVF 2.0 layout for this mesh type,
    /// ending with the `# Begin: Data <repr>` line that opens the data block.
    ///
    /// Unrecognized keys are not written. Text values containing a line break or `##`
    /// are rejected with [`WriteError::InvalidHeaderText`].
    pub fn render(&self, representation: Representation) -> Result<String, WriteError> {
        check_header_text("title", &self.title)?;
        check_header_text("meshunit", &self.meshunit)?;
        for (field, values) in [
            ("desc", &self.desc),
            ("valueunits", &self.valueunits),
            ("valuelabels", &self.valuelabels),
        ] {
            for value in values {
                check_header_text(field, value)?;
            }
        }

        let valueunits = quote_list("valueunits", &self.valueunits)?;
        let valuelabels = quote_list("valuelabels", &self.valuelabels)?;

        let mut out = String::with_capacity(1024);

        // `write!` into a String cannot fail
        let _ = write!(
            out,
            "# OOMMF OVF 2.0\n\
             #\n\
             # Segment count: 1\n\
             #\n\
             # Begin: Segment\n\
             # Begin: Header\n\
             #\n\
             # Title: {}\n\
             #\n",
            self.title
        );

        for line in &self.desc {
            let _ = writeln!(out, "# desc: {}", line);
        }

        let _ = write!(
            out,
            "#\n\
             # meshunit: {}\n\
             #\n\
             # meshtype: {}\n\
             #\n",
            self.meshunit,
            self.mesh_type()
        );

        match &self.mesh {
            Mesh::Rectangular(rect) => {
                self.write_bounds(&mut out);
                write_axis_values(&mut out, "stepsize : ", rect.stepsize.map(format_float));
                write_axis_values(&mut out, "base : ", rect.base.map(format_float));
                write_axis_values(&mut out, "nodes : ", rect.nodes.map(|n| n.to_string()));
            }
            Mesh::Irregular(irregular) => {
                let _ = write!(out, "# pointcount: {}\n#\n", irregular.pointcount);
                self.write_bounds(&mut out);
            }
        }

        let _ = write!(
            out,
            "#\n\
             # valuedim: {}\n\
             #\n\
             # valueunits:  {}\n\
             # valuelabels: {}\n\
             #\n\
             # End: Header\n\
             # Begin: Data {}\n",
            self.valuedim, valueunits, valuelabels, representation
        );

        Ok(out)
    }

    fn write_bounds(&self, out: &mut String) {
        write_axis_values(out, "min: ", self.bounds.min.map(format_float));
        write_axis_values(out, "max: ", self.bounds.max.map(format_float));
    }
}

/// one `# <axis><suffix><value>` line per axis
fn write_axis_values(out: &mut String, suffix: &str, values: [String; 3]) {
    for (axis, value) in mesh::AXES.iter().zip(values) {
        let _ = writeln!(out, "# {}{}{}", axis, suffix, value);
    }
}

/// a value must stay on its own line, and `##` would start a comment when read back
fn check_header_text(field: &'static str, value: &str) -> Result<(), WriteError> {
    let found = if value.contains(['\n', '\r']) {
        "a line break"
    } else if value.contains("##") {
        "`##`"
    } else {
        return Ok(());
    };

    Err(InvalidHeaderText::new(field, value.to_string(), found).into())
}

/// join a list with shell quoting so multi-word entries survive a round trip
fn quote_list(field: &'static str, list: &[String]) -> Result<String, WriteError> {
    shlex::try_join(list.iter().map(String::as_str))
        .map_err(|source| WriteError::Quote { field, source })
}
