//! Bidirectional label/address table produced by the layout pass

use std::collections::BTreeMap;

use crate::resolver::LabelResolver;

/// Label ↔ address table.
///
/// A label keeps the address of its first definition. Several labels may
/// share an address; [`AddressMap::label_at`] returns the first one
/// recorded there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressMap {
    by_label: BTreeMap<String, u16>,
    by_address: BTreeMap<u16, Vec<String>>,
}

impl AddressMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `label` at `address`. Returns false, leaving the table
    /// unchanged, if the label is already defined.
    pub fn insert(&mut self, label: impl Into<String>, address: u16) -> bool {
        let label = label.into();
        if self.by_label.contains_key(&label) {
            return false;
        }
        self.by_address.entry(address).or_default().push(label.clone());
        self.by_label.insert(label, address);
        true
    }

    pub fn address_of(&self, label: &str) -> Option<u16> {
        self.by_label.get(label).copied()
    }

    pub fn label_at(&self, address: u16) -> Option<&str> {
        self.by_address
            .get(&address)
            .and_then(|labels| labels.first())
            .map(String::as_str)
    }

    /// Every label defined at `address`, in definition order.
    pub fn labels_at(&self, address: u16) -> &[String] {
        self.by_address.get(&address).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Identifier for the routine at `address`, derived from its label.
    ///
    /// ```
    /// use isa6502::layout::AddressMap;
    ///
    /// let mut map = AddressMap::new();
    /// map.insert("GameCoreRoutine", 0x8212);
    /// map.insert("Sub.Loop", 0x8300);
    /// assert_eq!(map.function_name(0x8212).as_deref(), Some("gameCoreRoutine"));
    /// assert_eq!(map.function_name(0x8300).as_deref(), Some("sub_Loop"));
    /// assert_eq!(map.function_name(0x9000), None);
    /// ```
    pub fn function_name(&self, address: u16) -> Option<String> {
        self.label_at(address).map(to_identifier)
    }

    /// Labels in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.by_address
            .iter()
            .flat_map(|(addr, labels)| labels.iter().map(move |label| (*addr, label.as_str())))
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

impl LabelResolver for AddressMap {
    fn resolve(&self, label: &str) -> Option<i32> {
        self.address_of(label).map(i32::from)
    }
}

/// camelCase identifier: first character lowercased, anything other than
/// ASCII alphanumerics and `_` replaced by `_`, leading digit prefixed.
fn to_identifier(label: &str) -> String {
    let mut name = String::with_capacity(label.len() + 1);
    for (i, c) in label.chars().enumerate() {
        match c {
            c if i == 0 && c.is_ascii_digit() => {
                name.push('_');
                name.push(c);
            }
            c if i == 0 => name.push(c.to_ascii_lowercase()),
            c if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
            _ => name.push('_'),
        }
    }
    name
}
