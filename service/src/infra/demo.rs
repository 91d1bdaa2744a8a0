//! Built-in sample data shown when the backend is unreachable and the demo
//! fallback is enabled.

use common::{datetime::Date, DateTimeOf};
use rust_decimal::Decimal;

use crate::domain::{appointment::Slot, Agent, Property};

/// First hour of the sample working day.
const OPENING_HOUR: u8 = 9;

/// Hour the sample working day ends at.
const CLOSING_HOUR: u8 = 18;

/// Hour of the sample lunch break, which is never available.
const LUNCH_HOUR: u8 = 13;

/// Returns sample [`Agent`]s.
#[must_use]
pub fn agents() -> Vec<Agent> {
    [
        (1, "María González", "maria.gonzalez@inmobiliaria.pe", "+51 987 654 321"),
        (2, "Carlos Rodríguez", "carlos.rodriguez@inmobiliaria.pe", "+51 987 123 456"),
        (3, "Ana Martínez", "ana.martinez@inmobiliaria.pe", "+51 912 345 678"),
    ]
    .into_iter()
    .map(|(id, name, email, phone)| Agent {
        id: i64::into(id),
        name: name.to_owned(),
        email: Some(email.to_owned()),
        phone: Some(phone.to_owned()),
        photo_url: None,
    })
    .collect()
}

/// Returns sample [`Property`]s.
#[must_use]
pub fn properties() -> Vec<Property> {
    [
        (1, "Departamento en Miraflores", "Av. Larco 1150, Miraflores", 285_000),
        (2, "Casa en La Molina", "Calle Los Pinos 245, La Molina", 520_000),
        (3, "Oficina en San Isidro", "Av. Javier Prado Este 560, San Isidro", 410_000),
    ]
    .into_iter()
    .map(|(id, title, address, price)| Property {
        id: i64::into(id),
        title: title.to_owned(),
        address: Some(address.to_owned()),
        price: Some(Decimal::from(price)),
        image_url: None,
    })
    .collect()
}

/// Returns sample hourly [`Slot`]s of the provided [`Date`].
#[must_use]
pub fn slots(date: Date) -> Vec<Slot> {
    (OPENING_HOUR..CLOSING_HOUR)
        .filter_map(|hour| {
            Some(Slot {
                start_time: DateTimeOf::at(date, hour, 0)?,
                end_time: DateTimeOf::at(date, hour + 1, 0)?,
                available: hour != LUNCH_HOUR,
            })
        })
        .collect()
}
