// file: src/collections.rs
// version: 1.0.0
// guid: b10bb308-26bb-4975-af76-8e3af842a090

//! Queryable collections
//!
//! [`WhereList`] is an insertion-ordered list that can be narrowed with a
//! [`Filter`] of per-field equality predicates. [`AddressList`] builds the
//! address views used by the distro builders (`public().ipv4().first()` and
//! friends) on top of it.

use crate::network::types::{Address, LogicalInterface};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Items that expose named fields for filtering
pub trait Queryable {
    /// Value of `key`, or `None` when the item has no such field
    fn field(&self, key: &str) -> Option<Value>;
}

impl Queryable for Value {
    fn field(&self, key: &str) -> Option<Value> {
        self.as_object()?.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Predicate {
    key: String,
    expected: Value,
    missing_default: Option<Value>,
}

/// Set of equality predicates applied to every item of a [`WhereList`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
    case_insensitive: Option<bool>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to equal `value`; items without `key` are excluded
    pub fn eq(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            key: key.to_string(),
            expected: value.into(),
            missing_default: None,
        });
        self
    }

    /// Require `key` to equal `value`, treating a missing `key` as `default`
    pub fn eq_or(mut self, key: &str, value: impl Into<Value>, default: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            key: key.to_string(),
            expected: value.into(),
            missing_default: Some(default.into()),
        });
        self
    }

    /// Compare strings case-insensitively, overriding the list's own setting
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }

    /// Whether `item` satisfies every predicate
    pub fn matches<T: Queryable>(&self, item: &T, list_lowercase: bool) -> bool {
        let lowercase = self.case_insensitive.unwrap_or(list_lowercase);
        self.predicates.iter().all(|p| {
            let actual = match item.field(&p.key) {
                Some(v) => v,
                None => match &p.missing_default {
                    Some(default) => default.clone(),
                    None => return false,
                },
            };
            values_equal(&actual, &p.expected, lowercase)
        })
    }
}

fn values_equal(actual: &Value, expected: &Value, lowercase: bool) -> bool {
    match (actual, expected) {
        (Value::String(a), Value::String(b)) if lowercase => a.to_lowercase() == b.to_lowercase(),
        _ => actual == expected,
    }
}

/// Ordered list supporting `select`/`find` queries
#[derive(Debug, Clone, PartialEq)]
pub struct WhereList<T> {
    items: Vec<T>,
    always_lower: bool,
}

impl<T> Default for WhereList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            always_lower: false,
        }
    }
}

impl<T> WhereList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            always_lower: false,
        }
    }

    /// List whose queries compare strings case-insensitively by default
    pub fn case_insensitive(items: Vec<T>) -> Self {
        Self {
            items,
            always_lower: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Head element, or `None` for an empty list
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Queryable + Clone> WhereList<T> {
    /// Items matching `filter`, in original order
    pub fn select(&self, filter: &Filter) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| filter.matches(*item, self.always_lower))
                .cloned()
                .collect(),
            always_lower: self.always_lower,
        }
    }

    /// First item matching `filter`
    pub fn find(&self, filter: &Filter) -> Option<&T> {
        self.items
            .iter()
            .find(|item| filter.matches(*item, self.always_lower))
    }
}

impl<T> From<Vec<T>> for WhereList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for WhereList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for WhereList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a WhereList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> std::ops::Index<usize> for WhereList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for WhereList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.items == other
    }
}

impl<T: Serialize> Serialize for WhereList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// Resolved interfaces in declaration order
pub type InterfaceList = WhereList<LogicalInterface>;

/// Addresses with the filtered views used by the distro templates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressList(WhereList<Address>);

impl AddressList {
    pub fn new(addresses: Vec<Address>) -> Self {
        Self(WhereList::new(addresses))
    }

    pub fn select(&self, filter: &Filter) -> Self {
        Self(self.0.select(filter))
    }

    pub fn find(&self, filter: &Filter) -> Option<&Address> {
        self.0.find(filter)
    }

    pub fn ipv4(&self) -> Self {
        self.select(&Filter::new().eq("address_family", 4))
    }

    pub fn ipv6(&self) -> Self {
        self.select(&Filter::new().eq("address_family", 6))
    }

    pub fn public(&self) -> Self {
        self.select(&Filter::new().eq("public", true))
    }

    /// Addresses not flagged public; a missing flag counts as private
    pub fn private(&self) -> Self {
        self.select(&Filter::new().eq_or("public", false, false))
    }

    pub fn management(&self) -> Self {
        self.select(&Filter::new().eq("management", true))
    }

    pub fn not_management(&self) -> Self {
        self.select(&Filter::new().eq_or("management", false, false))
    }

    /// Head address, or `None` when the view is empty
    pub fn first(&self) -> Option<&Address> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Address] {
        self.0.as_slice()
    }
}

impl PartialEq<Vec<Address>> for AddressList {
    fn eq(&self, other: &Vec<Address>) -> bool {
        self.0 == *other
    }
}

impl Serialize for AddressList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
