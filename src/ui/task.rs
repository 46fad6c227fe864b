//! Starting the frontends, which gives the player its [`ui::Handle`].

use tokio::sync::broadcast;

use crate::ui::{self, input, interface::Params, Environment};

/// How many updates a slow frontend may fall behind by.
const BACKLOG: usize = 32;

impl crate::Tasks {
    /// Starts MPRIS if it's enabled, then the renderer & key listener
    /// unless pulse is running headless.
    #[cfg_attr(not(feature = "mpris"), allow(clippy::unused_async))]
    pub async fn ui(
        &mut self,
        state: ui::State,
        params: Params,
        alternate: bool,
    ) -> crate::Result<ui::Handle> {
        let (updater, updates) = broadcast::channel(BACKLOG);

        #[cfg(feature = "mpris")]
        let mpris = ui::mpris::Server::new(&state, self.tx()).await?;

        let mut environment = None;
        if params.enabled {
            environment = Some(Environment::ready(alternate)?);

            self.spawn("interface", ui::run(updates, state, params));
            self.spawn("input", input::listen(self.tx()));
        }

        Ok(ui::Handle {
            updater,
            environment,
            #[cfg(feature = "mpris")]
            mpris,
        })
    }
}
