//! [`Backend`] implementations of the [`Rest`] client.

use common::{
    datetime::format_date,
    operations::{By, Delete, Insert, Patch, Select, Update, Upload},
    pagination::{self, Page},
};
use reqwest::{
    multipart::{Form, Part},
    Method,
};
use tracerr::Traced;

use crate::{
    domain::{
        agency,
        appointment::{Slot, SlotQuery},
        currency::{self, SetBase},
        facility::Vicinity,
        upload::{Cropped, FileUrl, Target, Uploaded},
        user::{self, session::Credentials, PasswordChange, Session},
        Activatable, Agency, Appointment, Currency, Editable, NearbyFacility,
        Resource, ToggleActive, User,
    },
    infra::{
        backend::{Action, Authorize as _, Error, Operation},
        Backend,
    },
};

use super::{decode, Rest};

impl<R: Resource> Backend<Select<By<Vec<R>, ()>>> for Rest {
    type Ok = Vec<R>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<R>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::List, R::LABELS);
        // Some collections answer with a paginated envelope even when no page
        // is requested.
        let body: pagination::serde::Body<R> = self
            .json(op, self.request(Method::GET, R::PATH))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(match body {
            pagination::serde::Body::Paged(paged) => paged.content,
            pagination::serde::Body::Bare(all) => all,
        })
    }
}

impl<R: Resource> Backend<Select<By<Page<R>, pagination::Arguments>>>
    for Rest
{
    type Ok = Page<R>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page<R>, pagination::Arguments>>,
    ) -> Result<Self::Ok, Self::Err> {
        let args = by.into_inner();
        let op = Operation::new(Action::List, R::LABELS);
        let body: pagination::serde::Body<R> = self
            .json(
                op,
                self.request(Method::GET, R::PATH)
                    .query(&args.query(R::PAGING)),
            )
            .await
            .map_err(tracerr::wrap!())?;
        Ok(body.into_page(args))
    }
}

impl<R: Resource> Backend<Select<By<Option<R>, R::Id>>> for Rest {
    type Ok = Option<R>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<R>, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::Get, R::LABELS);
        let path = format!("{}/{}", R::PATH, by.into_inner());
        let Some(body) = self
            .send(op, self.request(Method::GET, &path), true)
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };
        decode(op, &body).map(Some)
    }
}

impl<R: Editable> Backend<Insert<By<R, R::Draft>>> for Rest {
    type Ok = R;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(by): Insert<By<R, R::Draft>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::Create, R::LABELS);
        self.json(op, self.request(Method::POST, R::PATH).json(by.inner()))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<R: Editable> Backend<Update<By<R, (R::Id, R::Draft)>>> for Rest {
    type Ok = R;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(by): Update<By<R, (R::Id, R::Draft)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, draft) = by.into_inner();
        let op = Operation::new(Action::Update, R::LABELS);
        let path = format!("{}/{id}", R::PATH);
        self.json(op, self.request(Method::PUT, &path).json(&draft))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<R: Resource> Backend<Delete<By<R, R::Id>>> for Rest {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<R, R::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::Delete, R::LABELS);
        let path = format!("{}/{}", R::PATH, by.into_inner());
        self.unit(op, self.request(Method::DELETE, &path))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<R: Activatable> Backend<Patch<By<R, (R::Id, ToggleActive)>>> for Rest {
    type Ok = R;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Patch(by): Patch<By<R, (R::Id, ToggleActive)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, _) = by.into_inner();
        let op = Operation::new(Action::ToggleActive, R::LABELS);
        let path = format!("{}/{id}/toggle-active", R::PATH);
        self.json(op, self.request(Method::PATCH, &path))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Patch<By<Currency, (currency::Id, SetBase)>>> for Rest {
    type Ok = Currency;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Patch(by): Patch<By<Currency, (currency::Id, SetBase)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, _) = by.into_inner();
        let op = Operation::new(Action::SetBase, Currency::LABELS);
        let path = format!("{}/{id}/set-base", Currency::PATH);
        self.json(op, self.request(Method::PATCH, &path))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Select<By<agency::Stats, ()>>> for Rest {
    type Ok = agency::Stats;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<agency::Stats, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::Stats, Agency::LABELS);
        let path = format!("{}/stats", Agency::PATH);
        self.json(op, self.request(Method::GET, &path))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Select<By<Vec<NearbyFacility>, Vicinity>>> for Rest {
    type Ok = Vec<NearbyFacility>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<NearbyFacility>, Vicinity>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Vicinity {
            latitude,
            longitude,
            radius_km,
        } = by.into_inner();
        let op = Operation::new(Action::Nearby, NearbyFacility::LABELS);
        let path = format!("{}/nearby", NearbyFacility::PATH);
        self.json(
            op,
            self.request(Method::GET, &path).query(&[
                ("latitude", latitude),
                ("longitude", longitude),
                ("radius", radius_km),
            ]),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl Backend<Select<By<Vec<Slot>, SlotQuery>>> for Rest {
    type Ok = Vec<Slot>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Slot>, SlotQuery>>,
    ) -> Result<Self::Ok, Self::Err> {
        let SlotQuery { agent_id, date } = by.into_inner();
        let op = Operation::new(Action::AvailableSlots, Appointment::LABELS);
        let path = format!("{}/available-slots", Appointment::PATH);
        self.json(
            op,
            self.request(Method::GET, &path).query(&[
                ("agentId", agent_id.to_string()),
                ("date", format_date(date)),
            ]),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl Backend<Insert<By<Session, Credentials>>> for Rest {
    type Ok = Session;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(by): Insert<By<Session, Credentials>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::new(Action::Login, User::LABELS);
        let anonymous = self.anonymous();
        anonymous
            .json(
                op,
                anonymous.request(Method::POST, "auth/login").json(by.inner()),
            )
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Update<By<User, (user::Id, PasswordChange)>>> for Rest {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(by): Update<By<User, (user::Id, PasswordChange)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, change) = by.into_inner();
        let op = Operation::new(Action::ChangePassword, User::LABELS);
        let path = format!("{}/{id}/change-password", User::PATH);
        self.unit(op, self.request(Method::PUT, &path).json(&change))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Upload<By<FileUrl, (Target, Cropped, Option<FileUrl>)>>>
    for Rest
{
    type Ok = FileUrl;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Upload(by): Upload<By<FileUrl, (Target, Cropped, Option<FileUrl>)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (target, image, previous) = by.into_inner();
        let op = Operation::new(Action::Upload, target.labels());

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.name().to_owned())
            .mime_str(Cropped::MIME)
            .map_err(|e| tracerr::new!(Error::new(op, e)))?;
        let mut form = Form::new().part("file", part);
        if let Some(url) = previous {
            form = form.text("previousUrl", String::from(url));
        }

        let uploaded: Uploaded = self
            .json(
                op,
                self.request(Method::POST, &target.upload_path())
                    .multipart(form),
            )
            .await
            .map_err(tracerr::wrap!())?;
        Ok(uploaded.file_url)
    }
}

impl Backend<Delete<By<FileUrl, (Target, FileUrl)>>> for Rest {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<FileUrl, (Target, FileUrl)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (target, url) = by.into_inner();
        let op = Operation::new(Action::DeleteFile, target.labels());

        let req = self.request(Method::DELETE, &target.delete_path());
        let req = match target {
            Target::AgencyLogo => req.query(&[("fileUrl", String::from(url))]),
            Target::UserPhoto(_) => req,
        };
        self.unit(op, req).await.map_err(tracerr::wrap!())
    }
}
