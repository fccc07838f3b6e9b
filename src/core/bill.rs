//! Bill model - people, items, and the aggregate bill state.
//!
//! `BillState` is the single input to the allocation engine. The editing methods
//! here keep its structural invariants (payer resolves, consumers resolve, prices
//! and tax non-negative) while still allowing the incomplete states a bill passes
//! through while it is being entered: zero-priced items and items nobody has
//! claimed yet.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a person within a bill
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

/// Opaque identifier of an item within a bill
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl PersonId {
    /// Creates a person id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ItemId {
    /// Creates an item id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Someone who eats from the bill, pays it, or both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier within the bill
    pub id: PersonId,
    /// Display name used in breakdowns and export text
    pub name: String,
    /// Marks a payer who is not part of the consuming group
    #[serde(default)]
    pub is_external: bool,
}

impl Person {
    /// Creates a regular (non-external) person.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(id),
            name: name.into(),
            is_external: false,
        }
    }

    /// Creates a payer who does not consume anything.
    pub fn external(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_external: true,
            ..Self::new(id, name)
        }
    }
}

/// A priced line of the bill shared by its consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier within the bill
    pub id: ItemId,
    /// Display name (e.g., "Pad Thai")
    pub name: String,
    /// Pre-tax price in dollars
    pub price: f64,
    /// People sharing this item, in the order they were added
    #[serde(default)]
    pub consumer_ids: Vec<PersonId>,
}

impl Item {
    /// Creates an item with the given consumers.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        consumer_ids: &[&str],
    ) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            price,
            consumer_ids: consumer_ids.iter().map(|c| PersonId::new(*c)).collect(),
        }
    }
}

/// The complete bill: who was there, who paid, what was ordered, and the tax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillState {
    /// People in display order; this order is also the tie-break order for rounding
    pub people: Vec<Person>,
    /// The person who fronted the bill
    pub payer_id: PersonId,
    /// Items in display order
    #[serde(default)]
    pub items: Vec<Item>,
    /// Single tax amount for the whole bill
    #[serde(default)]
    pub overall_tax: f64,
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

impl BillState {
    /// Starts an empty bill paid by `payer`.
    #[must_use]
    pub fn new(payer: Person) -> Self {
        Self {
            payer_id: payer.id.clone(),
            people: vec![payer],
            items: Vec::new(),
            overall_tax: 0.0,
        }
    }

    /// Looks up a person by id.
    #[must_use]
    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }

    /// Display name for a person id, if it resolves.
    #[must_use]
    pub fn person_name(&self, id: &PersonId) -> Option<&str> {
        self.person(id).map(|p| p.name.as_str())
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    fn item_mut(&mut self, id: &ItemId) -> Result<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| Error::ItemNotFound { id: id.to_string() })
    }

    /// True when the person pays the bill or consumes any item.
    #[must_use]
    pub fn is_referenced(&self, id: &PersonId) -> bool {
        &self.payer_id == id
            || self
                .items
                .iter()
                .any(|item| item.consumer_ids.contains(id))
    }

    /// Sum of pre-tax item prices, unrounded.
    #[must_use]
    pub fn raw_subtotal(&self) -> f64 {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Adds a person to the end of the roster.
    pub fn add_person(&mut self, person: Person) -> Result<()> {
        if self.person(&person.id).is_some() {
            return Err(Error::DuplicateId {
                id: person.id.to_string(),
            });
        }
        self.people.push(person);
        Ok(())
    }

    /// Removes a person who is neither the payer nor a consumer of any item.
    pub fn remove_person(&mut self, id: &PersonId) -> Result<Person> {
        let index = self
            .people
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| Error::PersonNotFound { id: id.to_string() })?;
        if self.is_referenced(id) {
            return Err(Error::PersonInUse { id: id.to_string() });
        }
        Ok(self.people.remove(index))
    }

    /// Makes an existing person the payer.
    pub fn set_payer(&mut self, id: &PersonId) -> Result<()> {
        if self.person(id).is_none() {
            return Err(Error::PersonNotFound { id: id.to_string() });
        }
        self.payer_id = id.clone();
        Ok(())
    }

    fn check_consumers(&self, consumer_ids: &[PersonId]) -> Result<()> {
        match consumer_ids.iter().find(|c| self.person(c).is_none()) {
            Some(missing) => Err(Error::PersonNotFound {
                id: missing.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Appends an item after checking its price and consumers.
    pub fn add_item(&mut self, item: Item) -> Result<()> {
        if self.item(&item.id).is_some() {
            return Err(Error::DuplicateId {
                id: item.id.to_string(),
            });
        }
        check_amount(item.price)?;
        self.check_consumers(&item.consumer_ids)?;
        self.items.push(item);
        Ok(())
    }

    /// Changes the pre-tax price of an item.
    pub fn update_item_price(&mut self, id: &ItemId, price: f64) -> Result<()> {
        check_amount(price)?;
        self.item_mut(id)?.price = price;
        Ok(())
    }

    /// Replaces the consumer set of an item. An empty set is allowed while editing.
    pub fn set_item_consumers(&mut self, id: &ItemId, consumer_ids: Vec<PersonId>) -> Result<()> {
        self.check_consumers(&consumer_ids)?;
        let mut deduped: Vec<PersonId> = Vec::with_capacity(consumer_ids.len());
        for consumer in consumer_ids {
            if !deduped.contains(&consumer) {
                deduped.push(consumer);
            }
        }
        self.item_mut(id)?.consumer_ids = deduped;
        Ok(())
    }

    /// Deletes an item.
    pub fn remove_item(&mut self, id: &ItemId) -> Result<Item> {
        let index = self
            .items
            .iter()
            .position(|i| &i.id == id)
            .ok_or_else(|| Error::ItemNotFound { id: id.to_string() })?;
        Ok(self.items.remove(index))
    }

    /// Sets the single tax amount for the bill.
    pub fn set_overall_tax(&mut self, tax: f64) -> Result<()> {
        check_amount(tax)?;
        self.overall_tax = tax;
        Ok(())
    }
}

/// Insertion-ordered association from person id to an amount.
///
/// Entries keep the order in which they were inserted, which for every map the
/// engine builds is the order of `BillState::people`. The penny reconciler relies
/// on that order to break ties deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonAmounts {
    entries: Vec<(PersonId, f64)>,
}

impl PersonAmounts {
    /// Creates an empty association.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets the amount for `id`, keeping its original position if already present.
    pub fn insert(&mut self, id: PersonId, amount: f64) {
        match self.entries.iter_mut().find(|(k, _)| k == &id) {
            Some((_, v)) => *v = amount,
            None => self.entries.push((id, amount)),
        }
    }

    /// Amount for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &PersonId) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| *v)
    }

    pub(crate) fn get_mut(&mut self, id: &PersonId) -> Option<&mut f64> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// True when no people are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PersonId, f64)> for PersonAmounts {
    fn from_iter<I: IntoIterator<Item = (PersonId, f64)>>(iter: I) -> Self {
        let mut amounts = Self::new();
        for (id, amount) in iter {
            amounts.insert(id, amount);
        }
        amounts
    }
}
