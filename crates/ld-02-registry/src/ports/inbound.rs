//! # Inbound Ports (Driving Ports)
//!
//! The API the boundary layer calls. `RegistrationService` is the only
//! implementation.

use crate::domain::commands::{DeleteCommand, RegisterCommand, SignedPayload, UpdateCommand};
use crate::domain::entities::{HostInfo, Lease};
use crate::domain::errors::RegistryError;

pub trait RegistrationApi: Send + Sync {
    /// Lease a name and replace its record set in one atomic write.
    ///
    /// All fields are validated before the first read. Takeover of a live
    /// lease is governed by the configured `CollisionPolicy`; `signed` is
    /// only consulted when the policy asks for an ownership proof.
    ///
    /// ## Errors
    ///
    /// - `Validation`: bad name, days, owner token or record
    /// - `Auth`: live lease and the policy forbids or could not prove takeover
    /// - `Storage`: the write failed; nothing was committed
    fn register(
        &self,
        cmd: RegisterCommand,
        signed: SignedPayload<'_>,
    ) -> Result<Lease, RegistryError>;

    /// Replace the record set of a live, owned lease.
    ///
    /// ## Errors
    ///
    /// - `Validation`: bad name or record
    /// - `NotFound`: no live lease for the name
    /// - `Auth`: anonymous lease, or the signature does not verify against
    ///   the lease owner over `signed.body`
    /// - `Storage`
    fn update(&self, cmd: UpdateCommand, signed: SignedPayload<'_>) -> Result<(), RegistryError>;

    /// Release a name and all of its records. Deleting an absent name
    /// succeeds.
    ///
    /// ## Errors
    ///
    /// - `Validation`: bad name or owner token
    /// - `Auth`: bad signature over the claimed owner, anonymous lease, or
    ///   the claimed owner does not hold the lease
    /// - `Storage`
    fn delete(&self, cmd: DeleteCommand, signed: SignedPayload<'_>) -> Result<(), RegistryError>;

    /// Every leased name, sorted, expired ones included.
    fn list_names(&self) -> Result<Vec<String>, RegistryError>;

    /// The live lease for `name`. Unknown and expired are both `NotFound`.
    fn lookup(&self, name: &str) -> Result<Lease, RegistryError>;

    /// The live lease for `name` with its current record set.
    fn lookup_host(&self, name: &str) -> Result<HostInfo, RegistryError>;
}
