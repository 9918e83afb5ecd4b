/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the CryptoAuth software secure element.

--*/

mod ecc256;
mod soft_element;

pub use ecc256::{Ecc256, Ecc256PrivKey};
pub use soft_element::SoftSecureElement;
