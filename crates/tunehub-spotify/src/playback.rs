//! Playback start with inactive-device recovery.
//!
//! Starting playback fails when the user has no active device, which is the
//! normal state after the web player has been idle. Recovery wakes the first
//! available device and retries once.

use tracing::debug;

use tunehub_core::error::AppError;
use tunehub_core::result::AppResult;
use tunehub_core::types::UserId;

use crate::executor::SpotifyService;

impl SpotifyService {
    /// Starts playback of the given track URIs, waking an inactive device
    /// if the first attempt fails.
    ///
    /// Recovery makes at most one transfer and one retry. If any recovery
    /// step fails (devices cannot be listed, no usable device, transfer or
    /// retry fails), the error of the ORIGINAL playback attempt is what the
    /// caller sees; recovery failures never replace it.
    pub async fn play_tracks(&self, user_id: &UserId, uris: Vec<String>) -> AppResult<()> {
        match self.start_playback(user_id, uris.clone()).await {
            Ok(()) => Ok(()),
            Err(original) => self.recover_playback(user_id, uris, original).await,
        }
    }

    async fn recover_playback(
        &self,
        user_id: &UserId,
        uris: Vec<String>,
        original: AppError,
    ) -> AppResult<()> {
        let devices = match self.devices(user_id).await {
            Ok(devices) => devices,
            Err(_) => return Err(original),
        };

        // Wake the first listed device. Devices without an id cannot be
        // targeted by a transfer.
        let Some(device_id) = devices.first().and_then(|d| d.id.clone()) else {
            return Err(original);
        };

        debug!(user_id = %user_id, device_id = %device_id, "retrying playback on first available device");

        if self.transfer_playback(user_id, &device_id).await.is_err() {
            return Err(original);
        }

        match self.start_playback(user_id, uris).await {
            Ok(()) => Ok(()),
            Err(_) => Err(original),
        }
    }
}
