use crate::prelude::*;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
/// Everything read from an OVF 2.0 file.
///
/// `data` holds one array per value component, keyed by its `valuelabels` entry. For
/// rectangular meshes every array (and every entry of `coords`) has the shape
/// `(xnodes, ynodes, znodes)`; for irregular meshes they are one dimensional with
/// `pointcount` entries.
pub struct OvfData {
    pub data: Fields,
    pub coords: Coordinates,
    pub metadata: Header,
    /// how the data block was stored on disk
    pub representation: Representation,
}

impl OvfData {
    pub fn new(
        data: Fields,
        coords: Coordinates,
        metadata: Header,
        representation: Representation,
    ) -> Self {
        Self {
            data,
            coords,
            metadata,
            representation,
        }
    }

    /// `text`, `Binary 4` or `Binary 8`
    pub fn representation_label(&self) -> String {
        self.representation.to_string()
    }
}

/// Position of every sample along each axis, shaped like the value arrays
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub x: ArrayD<f64>,
    pub y: ArrayD<f64>,
    pub z: ArrayD<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deref)]
/// Labelled value arrays in the order their labels appear in the header
pub struct Fields(Vec<(String, ArrayD<f64>)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<&ArrayD<f64>> {
        self.0
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, array)| array)
    }

    /// Add an array under `label`. An existing array with the same label is replaced
    /// in place and returned.
    pub fn insert(&mut self, label: impl Into<String>, array: ArrayD<f64>) -> Option<ArrayD<f64>> {
        let label = label.into();

        match self.0.iter_mut().find(|(key, _)| *key == label) {
            Some((_, existing)) => Some(std::mem::replace(existing, array)),
            None => {
                self.0.push((label, array));
                None
            }
        }
    }

    pub fn remove(&mut self, label: &str) -> Option<ArrayD<f64>> {
        let idx = self.0.iter().position(|(key, _)| key == label)?;
        Some(self.0.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn into_inner(self) -> Vec<(String, ArrayD<f64>)> {
        self.0
    }
}

impl FromIterator<(String, ArrayD<f64>)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, ArrayD<f64>)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (label, array) in iter {
            fields.insert(label, array);
        }
        fields
    }
}

impl Index<&str> for Fields {
    type Output = ArrayD<f64>;

    /// # Panics
    ///
    /// if there is no array called `label`
    fn index(&self, label: &str) -> &Self::Output {
        match self.get(label) {
            Some(array) => array,
            None => panic!("no field labelled `{}`", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(value: f64) -> ArrayD<f64> {
        ArrayD::from_elem(IxDyn(&[2]), value)
    }

    #[test]
    fn insertion_order_is_kept() {
        let fields: Fields = vec![
            ("m_z".to_string(), scalar(3.)),
            ("m_x".to_string(), scalar(1.)),
        ]
        .into_iter()
        .collect();

        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["m_z", "m_x"]);
        assert_eq!(fields["m_x"][[0]], 1.);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn insert_replaces_same_label() {
        let mut fields = Fields::new();
        assert!(fields.insert("u", scalar(1.)).is_none());
        assert!(fields.insert("v", scalar(2.)).is_none());

        let old = fields.insert("u", scalar(5.)).unwrap();
        assert_eq!(old[[1]], 1.);
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["u", "v"]);
        assert_eq!(fields["u"][[0]], 5.);

        assert_eq!(fields.remove("u").unwrap()[[0]], 5.);
        assert!(fields.get("u").is_none());
        assert!(fields.remove("u").is_none());
    }

    #[test]
    #[should_panic]
    fn missing_label_panics() {
        let fields = Fields::new();
        let _ = &fields["nope"];
    }
}
