//! Core value types used by mealscope state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::{opt_s, s};

/// Highest ingredient/measure column index in the recipe payload (`strIngredient1..=20`).
const MAX_INGREDIENT_COLUMNS: usize = 20;

/// One of the three auxiliary vocabularies used to populate filter choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Cuisine/area names (`strArea`).
    Area,
    /// Meal categories (`strCategory`).
    Category,
    /// Ingredients with id, description and type metadata (`strIngredient`).
    Ingredient,
}

impl ReferenceKind {
    /// All kinds in the order they are loaded at startup.
    pub const ALL: [Self; 3] = [Self::Area, Self::Category, Self::Ingredient];

    /// Query parameter letter used by the list endpoint (`list.php?<letter>=list`).
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Area => "a",
            Self::Category => "c",
            Self::Ingredient => "i",
        }
    }

    /// Key under which the serialized list lives in the persistent store.
    #[must_use]
    pub const fn store_key(self) -> &'static str {
        match self {
            Self::Area => "list_a",
            Self::Category => "list_c",
            Self::Ingredient => "list_i",
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Area => "areas",
            Self::Category => "categories",
            Self::Ingredient => "ingredients",
        }
    }
}

/// Single entry of a reference list.
///
/// Only ingredients carry the optional metadata; areas and categories are bare names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceItem {
    /// Display name, also the value passed to the filter operations.
    pub name: String,
    /// Service-side identifier (`idIngredient`).
    pub id: Option<String>,
    /// Long description (`strDescription`).
    pub description: Option<String>,
    /// Ingredient type (`strType`).
    pub item_type: Option<String>,
}

/// What: One element of a reference `meals` array, in the service's field names.
///
/// Details:
/// - Shared by the list endpoint payload and the persisted `list_*` entries, so the
///   store keeps exactly the shape the service returns.
/// - Only the name field matching the list's kind is read; the others stay `None`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct StoredItem {
    /// `idIngredient` (ingredients only).
    #[serde(rename = "idIngredient", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    /// `strArea`.
    #[serde(rename = "strArea", default, skip_serializing_if = "Option::is_none")]
    area: Option<String>,
    /// `strCategory`.
    #[serde(rename = "strCategory", default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    /// `strIngredient`.
    #[serde(rename = "strIngredient", default, skip_serializing_if = "Option::is_none")]
    ingredient: Option<String>,
    /// `strDescription` (ingredients only).
    #[serde(rename = "strDescription", default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// `strType` (ingredients only).
    #[serde(rename = "strType", default, skip_serializing_if = "Option::is_none")]
    item_type: Option<String>,
}

/// `{ "meals": [...] }` envelope; `meals` may be `null` or absent.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredList {
    /// Entries in service order.
    #[serde(default)]
    meals: Option<Vec<StoredItem>>,
}

/// `None` for missing or whitespace-only strings.
fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|x| !x.trim().is_empty())
}

impl StoredItem {
    /// Convert into a [`ReferenceItem`]; `None` when the kind's name field is missing or blank.
    fn into_item(self, kind: ReferenceKind) -> Option<ReferenceItem> {
        let name = match kind {
            ReferenceKind::Area => self.area,
            ReferenceKind::Category => self.category,
            ReferenceKind::Ingredient => self.ingredient,
        };
        let name = non_blank(name)?.trim().to_string();
        Some(ReferenceItem {
            name,
            id: non_blank(self.id),
            description: non_blank(self.description),
            item_type: non_blank(self.item_type),
        })
    }

    /// Service-shaped entry for `item`, with the name under the kind's field.
    fn from_item(kind: ReferenceKind, item: &ReferenceItem) -> Self {
        let name = Some(item.name.clone());
        let mut stored = Self {
            id: item.id.clone(),
            description: item.description.clone(),
            item_type: item.item_type.clone(),
            ..Self::default()
        };
        match kind {
            ReferenceKind::Area => stored.area = name,
            ReferenceKind::Category => stored.category = name,
            ReferenceKind::Ingredient => stored.ingredient = name,
        }
        stored
    }
}

/// Cached vocabulary for one [`ReferenceKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceList {
    /// Vocabulary this list belongs to.
    pub kind: ReferenceKind,
    /// Entries in service order.
    pub items: Vec<ReferenceItem>,
}

impl ReferenceList {
    /// What: Parse a `{ "meals": [...] }` envelope into a list.
    ///
    /// Inputs:
    /// - `kind`: Vocabulary being parsed
    /// - `body`: Decoded JSON body from the list endpoint or the store
    ///
    /// Output:
    /// - `Some(list)` with at least one entry; `None` when `meals` is null, absent, or yields nothing.
    ///
    /// Details:
    /// - Returning `None` for empty results is what keeps an empty payload from ever
    ///   replacing a cached list.
    #[must_use]
    pub fn from_envelope(kind: ReferenceKind, body: &Value) -> Option<Self> {
        let envelope = StoredList::deserialize(body).ok()?;
        Self::from_parts(kind, envelope)
    }

    /// Keep the usable entries of `envelope`; `None` when none remain.
    fn from_parts(kind: ReferenceKind, envelope: StoredList) -> Option<Self> {
        let items: Vec<ReferenceItem> = envelope
            .meals?
            .into_iter()
            .filter_map(|item| item.into_item(kind))
            .collect();
        if items.is_empty() {
            return None;
        }
        Some(Self { kind, items })
    }

    /// Parse the persisted text form; `None` when it is not valid JSON or carries no entries.
    #[must_use]
    pub fn from_stored(kind: ReferenceKind, raw: &str) -> Option<Self> {
        let envelope: StoredList = serde_json::from_str(raw).ok()?;
        Self::from_parts(kind, envelope)
    }

    /// Serialize into the `{ "meals": [...] }` text form used by the store.
    ///
    /// # Errors
    /// - Serialization failures from `serde_json`
    pub fn to_stored(&self) -> serde_json::Result<String> {
        let envelope = StoredList {
            meals: Some(
                self.items
                    .iter()
                    .map(|i| StoredItem::from_item(self.kind, i))
                    .collect(),
            ),
        };
        serde_json::to_string(&envelope)
    }

    /// Entry names in order, as offered to filter pickers.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Recipe record returned by the search, filter and lookup endpoints.
///
/// Filter responses only populate `id`, `name` and `thumbnail`; the other fields are
/// filled by search and lookup responses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipe {
    /// Service identifier (`idMeal`), used for detail lookups.
    pub id: String,
    /// Display name (`strMeal`).
    pub name: String,
    /// Image URL (`strMealThumb`).
    pub thumbnail: Option<String>,
    /// Preparation text (`strInstructions`).
    pub instructions: Option<String>,
    /// Category name (`strCategory`).
    pub category: Option<String>,
    /// Area name (`strArea`).
    pub area: Option<String>,
    /// Comma-separated tags (`strTags`).
    pub tags: Option<String>,
    /// Video link (`strYoutube`).
    pub youtube: Option<String>,
    /// `(ingredient, measure)` pairs collected from the numbered columns.
    pub ingredients: Vec<(String, String)>,
}

impl Recipe {
    /// What: Build a recipe from one element of a `meals` array.
    ///
    /// Inputs:
    /// - `v`: Raw JSON object
    ///
    /// Output:
    /// - `Some(Recipe)`; `None` when `idMeal` is missing, since detail lookups key on it.
    ///
    /// Details:
    /// - Ingredient columns with blank names are skipped; a blank measure becomes `""`.
    #[must_use]
    pub fn from_value(v: &Value) -> Option<Self> {
        let id = opt_s(v, "idMeal")?;
        let ingredients = (1..=MAX_INGREDIENT_COLUMNS)
            .filter_map(|n| {
                let ingredient = opt_s(v, &format!("strIngredient{n}"))?;
                let measure = opt_s(v, &format!("strMeasure{n}")).unwrap_or_default();
                Some((ingredient, measure))
            })
            .collect();
        Some(Self {
            id,
            name: s(v, "strMeal"),
            thumbnail: opt_s(v, "strMealThumb"),
            instructions: opt_s(v, "strInstructions"),
            category: opt_s(v, "strCategory"),
            area: opt_s(v, "strArea"),
            tags: opt_s(v, "strTags"),
            youtube: opt_s(v, "strYoutube"),
            ingredients,
        })
    }

    /// What: Parse every recipe in a `{ "meals": ... }` envelope.
    ///
    /// Output:
    /// - Recipes in service order; an empty vector when `meals` is `null` or absent.
    #[must_use]
    pub fn list_from_envelope(body: &Value) -> Vec<Self> {
        body.get("meals")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }
}

/// Persisted light/dark preference.
///
/// Stored under `nightMode` as `"1"` for [`DisplayMode::Light`] and `"0"` for
/// [`DisplayMode::Dark`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Light palette (stored as `1`); used when nothing is stored.
    #[default]
    Light,
    /// Dark palette (stored as `0`).
    Dark,
}

impl DisplayMode {
    /// Store key for the flag.
    pub const STORE_KEY: &'static str = "nightMode";

    /// Text written to the store.
    #[must_use]
    pub const fn as_stored(self) -> &'static str {
        match self {
            Self::Light => "1",
            Self::Dark => "0",
        }
    }

    /// What: Validate a stored flag.
    ///
    /// Inputs:
    /// - `raw`: Text read from the store
    ///
    /// Output:
    /// - `Some(mode)` for `"0"`/`"1"` (surrounding whitespace allowed); `None` for anything else.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Light),
            "0" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
