//! [`NearbyFacility`] definitions.

use common::define_kind;
use serde::{Deserialize, Serialize};

use super::{
    active_by_default, define_id, Activatable, Editable, FieldErrors, Labels,
    Resource, Validate,
};

/// Facility located near the listed properties (a school, a hospital).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyFacility {
    /// ID of this [`NearbyFacility`].
    pub id: Id,

    /// Name of this [`NearbyFacility`].
    pub name: String,

    /// [`Type`] of this [`NearbyFacility`].
    #[serde(rename = "type")]
    pub kind: Type,

    /// Postal address of this [`NearbyFacility`].
    #[serde(default)]
    pub address: Option<String>,

    /// Latitude of this [`NearbyFacility`], in degrees.
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude of this [`NearbyFacility`], in degrees.
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Contact phone of this [`NearbyFacility`].
    #[serde(default)]
    pub phone: Option<String>,

    /// Contact email of this [`NearbyFacility`].
    #[serde(default)]
    pub email: Option<String>,

    /// Website URL of this [`NearbyFacility`].
    #[serde(default)]
    pub website: Option<String>,

    /// Distance to this [`NearbyFacility`], in kilometers.
    #[serde(default)]
    pub distance_km: Option<f64>,

    /// Travel time to this [`NearbyFacility`], in minutes.
    #[serde(default)]
    pub travel_time_minutes: Option<u32>,

    /// Free-form description of this [`NearbyFacility`].
    #[serde(default)]
    pub description: Option<String>,

    /// Indicator whether this [`NearbyFacility`] is active.
    #[serde(default = "active_by_default")]
    pub active: bool,
}

define_id! {
    #[doc = "ID of a [`NearbyFacility`]."]
}

define_kind! {
    #[doc = "Category of a [`NearbyFacility`]."]
    enum Type {
        #[doc = "Hospital."]
        Hospital = "Hospital",

        #[doc = "Medical clinic."]
        Clinic = "Clínica",

        #[doc = "Pharmacy."]
        Pharmacy = "Farmacia",

        #[doc = "School."]
        School = "Colegio",

        #[doc = "University."]
        University = "Universidad",

        #[doc = "Kindergarten."]
        Kindergarten = "Nido",

        #[doc = "Supermarket."]
        Supermarket = "Supermercado",

        #[doc = "Shopping mall."]
        ShoppingMall = "Centro comercial",

        #[doc = "Market."]
        Market = "Mercado",

        #[doc = "Restaurant."]
        Restaurant = "Restaurante",

        #[doc = "Cafe."]
        Cafe = "Cafetería",

        #[doc = "Bank branch."]
        Bank = "Banco",

        #[doc = "Cash machine."]
        Atm = "Cajero",

        #[doc = "Gas station."]
        GasStation = "Grifo",

        #[doc = "Park."]
        Park = "Parque",

        #[doc = "Gym."]
        Gym = "Gimnasio",

        #[doc = "Sports center."]
        SportsCenter = "Centro deportivo",

        #[doc = "Police station."]
        PoliceStation = "Comisaría",

        #[doc = "Fire station."]
        FireStation = "Bomberos",

        #[doc = "Public transport hub."]
        PublicTransport = "Transporte público",

        #[doc = "Metro station."]
        MetroStation = "Estación de metro",

        #[doc = "Bus stop."]
        BusStop = "Paradero",

        #[doc = "Church."]
        Church = "Iglesia",

        #[doc = "Library."]
        Library = "Biblioteca",
    }
}

impl Resource for NearbyFacility {
    type Id = Id;

    const PATH: &'static str = "nearby-facilities";
    const LABELS: Labels = Labels {
        plural: "instalaciones cercanas",
        singular: "la instalación cercana",
    };

    fn id(&self) -> Id {
        self.id
    }
}

impl Editable for NearbyFacility {
    type Draft = Draft;
}

impl Activatable for NearbyFacility {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Data of a [`NearbyFacility`] to be created or updated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Name of the [`NearbyFacility`].
    pub name: String,

    /// [`Type`] of the [`NearbyFacility`].
    #[serde(rename = "type")]
    pub kind: Type,

    /// Postal address of the [`NearbyFacility`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Latitude of the [`NearbyFacility`], in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude of the [`NearbyFacility`], in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Contact phone of the [`NearbyFacility`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Contact email of the [`NearbyFacility`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Website URL of the [`NearbyFacility`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Distance to the [`NearbyFacility`], in kilometers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,

    /// Travel time to the [`NearbyFacility`], in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time_minutes: Option<u32>,

    /// Free-form description of the [`NearbyFacility`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Indicator whether the [`NearbyFacility`] is active.
    pub active: bool,
}

impl From<&NearbyFacility> for Draft {
    fn from(f: &NearbyFacility) -> Self {
        Self {
            name: f.name.clone(),
            kind: f.kind,
            address: f.address.clone(),
            latitude: f.latitude,
            longitude: f.longitude,
            phone: f.phone.clone(),
            email: f.email.clone(),
            website: f.website.clone(),
            distance_km: f.distance_km,
            travel_time_minutes: f.travel_time_minutes,
            description: f.description.clone(),
            active: f.active,
        }
    }
}

impl Validate for Draft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        _ = errors
            .required("name", &self.name)
            .check(
                "latitude",
                self.latitude.map_or(true, Vicinity::is_latitude),
                "La latitud debe estar entre -90 y 90",
            )
            .check(
                "longitude",
                self.longitude.map_or(true, Vicinity::is_longitude),
                "La longitud debe estar entre -180 y 180",
            )
            .check(
                "distanceKm",
                self.distance_km.map_or(true, |d| d >= 0.0),
                "La distancia no puede ser negativa",
            )
            .email("email", self.email.as_deref())
            .url("website", self.website.as_deref())
            .phone("phone", self.phone.as_deref());
        errors.into_result()
    }
}

/// Circular area to look for [`NearbyFacility`]s in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vicinity {
    /// Latitude of the center, in degrees.
    pub latitude: f64,

    /// Longitude of the center, in degrees.
    pub longitude: f64,

    /// Radius, in kilometers.
    pub radius_km: f64,
}

impl Vicinity {
    /// Radius used when none is specified, in kilometers.
    pub const DEFAULT_RADIUS_KM: f64 = 5.0;

    /// Creates a new [`Vicinity`] if the provided coordinates and radius are
    /// valid.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> Option<Self> {
        (Self::is_latitude(latitude)
            && Self::is_longitude(longitude)
            && radius_km.is_finite()
            && radius_km > 0.0)
            .then_some(Self {
                latitude,
                longitude,
                radius_km,
            })
    }

    /// Checks whether the provided value is a valid latitude.
    #[must_use]
    pub fn is_latitude(value: f64) -> bool {
        (-90.0..=90.0).contains(&value)
    }

    /// Checks whether the provided value is a valid longitude.
    #[must_use]
    pub fn is_longitude(value: f64) -> bool {
        (-180.0..=180.0).contains(&value)
    }
}

#[cfg(test)]
mod spec {
    use super::{Draft, NearbyFacility, Type, Vicinity};
    use crate::domain::Validate as _;

    #[test]
    fn has_all_categories() {
        assert_eq!(Type::ALL.len(), 24);
        assert_eq!(Type::ShoppingMall.to_string(), "SHOPPING_MALL");
        assert_eq!("gas_station".parse::<Type>().unwrap(), Type::GasStation);
    }

    #[test]
    fn decodes_type_field() {
        let facility: NearbyFacility = serde_json::from_value(
            serde_json::json!({
                "id": 1,
                "name": "Hospital Rebagliati",
                "type": "HOSPITAL",
                "latitude": -12.08,
                "longitude": -77.04,
                "distanceKm": 1.2,
            }),
        )
        .unwrap();

        assert_eq!(facility.kind, Type::Hospital);
        assert!(facility.active);
        assert_eq!(facility.kind.label(), "Hospital");
    }

    #[test]
    fn validates_coordinates() {
        let mut draft = Draft {
            name: "Parque Kennedy".into(),
            kind: Type::Park,
            address: None,
            latitude: Some(-12.12),
            longitude: Some(-77.03),
            phone: None,
            email: None,
            website: None,
            distance_km: None,
            travel_time_minutes: None,
            description: None,
            active: true,
        };
        assert!(draft.validate().is_ok());

        draft.latitude = Some(91.0);
        draft.longitude = Some(-181.0);
        let errors = draft.validate().unwrap_err();
        assert!(errors.get("latitude").is_some());
        assert!(errors.get("longitude").is_some());

        assert!(Vicinity::new(-12.1, -77.0, 2.0).is_some());
        assert!(Vicinity::new(-12.1, -77.0, 0.0).is_none());
        assert!(Vicinity::new(100.0, -77.0, 1.0).is_none());
    }
}
