//! [`Appointment`] read definitions.

pub use self::list::{Filter, SortKey};

pub mod list {
    //! [`Appointment`] list definitions.

    use common::{
        define_pagination,
        filter::{self, Choice, Direction, Search},
    };

    use crate::{
        domain::{appointment::Status, Appointment},
        read::Listable,
    };

    define_pagination!(Appointment);

    /// Filter of [`Appointment`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Search`] over title, client name and client email.
        pub search: Search,

        /// Required [`Status`].
        pub status: Choice<Status>,
    }

    impl filter::Filter<Appointment> for Filter {
        fn matches(&self, a: &Appointment) -> bool {
            self.status.matches(&a.status)
                && self.search.matches_any([
                    a.title.as_str(),
                    a.client_name.as_str(),
                    a.client_email.as_str(),
                ])
        }
    }

    /// Key to sort [`Appointment`]s by.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum SortKey {
        /// Scheduled date and time.
        #[default]
        Date,

        /// Title, ignoring case.
        Title,
    }

    impl Listable for Appointment {
        type Filter = Filter;
        type SortKey = SortKey;

        fn sort(items: &mut [&Self], key: SortKey, direction: Direction) {
            match key {
                SortKey::Date => filter::sort_by_key(items, direction, |a| {
                    a.appointment_date
                }),
                SortKey::Title => filter::sort_by_key(items, direction, |a| {
                    a.title.to_lowercase()
                }),
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::filter::{Choice, Direction, Search};

    use crate::{
        domain::{appointment::Status, Appointment},
        read::{view, Sort},
    };

    use super::{Filter, SortKey};

    fn appointment(id: i64, title: &str, date: &str, status: &str) -> Appointment {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "appointmentDate": date,
            "durationMinutes": 60,
            "propertyId": 1,
            "agentId": 1,
            "clientName": "Luis Pérez",
            "clientEmail": "luis@correo.pe",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn filters_by_status_and_latest_first() {
        let all = vec![
            appointment(1, "Visita depa", "2025-03-10T10:00:00Z", "PENDING"),
            appointment(2, "Firma", "2025-03-12T09:00:00Z", "CONFIRMED"),
            appointment(3, "Visita casa", "2025-03-11T15:30:00Z", "PENDING"),
        ];

        let filter = Filter {
            search: Search::new("visita"),
            status: Choice::Only(Status::Pending),
        };
        let sorted = view(
            &all,
            &filter,
            Some(Sort {
                key: SortKey::Date,
                direction: Direction::Descending,
            }),
        );

        assert_eq!(
            sorted.iter().map(|a| a.id.get()).collect::<Vec<_>>(),
            [3, 1],
        );
    }
}
