//! Session helpers that turn the cookie session into a [`Viewer`].
//!
//! Handlers never touch `actix_session` directly; they ask [`SessionContext`]
//! for the signed-in user or for a fully resolved viewer.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::AdminDirectory;
use crate::domain::{Error, UserId, Viewer};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const DEVICE_ID_KEY: &str = "device_id";

/// Request extractor wrapping the cookie session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember the signed-in user, rotating the session id.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the signed-in user.
    ///
    /// A session holding a device id keeps it under a fresh session id, so
    /// the browser falls back to its device favourites. Any other session is
    /// purged.
    pub fn sign_out(&self) {
        match self.0.get::<String>(DEVICE_ID_KEY) {
            Ok(Some(_)) => {
                self.0.remove(USER_ID_KEY);
                self.0.renew();
            }
            _ => self.0.purge(),
        }
    }

    /// Identifier of the browser holding this cookie, minted on first use.
    pub fn device_id(&self) -> Result<Uuid, Error> {
        let raw = self
            .0
            .get::<String>(DEVICE_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        if let Some(raw) = raw {
            match Uuid::parse_str(&raw) {
                Ok(id) => return Ok(id),
                Err(error) => warn!(%error, "replacing invalid device id in session cookie"),
            }
        }
        let id = Uuid::new_v4();
        self.0
            .insert(DEVICE_ID_KEY, id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        Ok(id)
    }

    /// The signed-in user, if any. A tampered id reads as signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "ignoring invalid user id in session cookie");
                None
            }
        }))
    }

    /// The signed-in user or `401 unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Resolve the viewer, consulting `admins` for signed-in users.
    ///
    /// A failed admin lookup is logged and the viewer is treated as a regular
    /// user.
    pub async fn viewer(&self, admins: &dyn AdminDirectory) -> Result<Viewer, Error> {
        let Some(user_id) = self.user_id()? else {
            return Ok(Viewer::anonymous());
        };
        let is_admin = match admins.is_admin(&user_id).await {
            Ok(flag) => flag,
            Err(error) => {
                warn!(%error, %user_id, "admin lookup failed; treating as non-admin");
                false
            }
        };
        Ok(Viewer {
            user_id: Some(user_id),
            is_admin,
        })
    }

    /// Resolve an admin viewer: `401` when anonymous, `403` when not admin.
    pub async fn require_admin(&self, admins: &dyn AdminDirectory) -> Result<Viewer, Error> {
        let viewer = self.viewer(admins).await?;
        if !viewer.is_signed_in() {
            return Err(Error::unauthorized("login required"));
        }
        if !viewer.is_admin {
            return Err(Error::forbidden("admin access required"));
        }
        Ok(viewer)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
