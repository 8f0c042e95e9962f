/// Generate client methods with oneshot channel boilerplate and automatic
/// tracing. Generated methods fail only when the service task is gone.
#[macro_export]
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            #[allow(dead_code)]
            pub async fn $method(
                &self,
                $($param: $param_type),*
            ) -> std::result::Result<$return_type, $crate::messages::ChannelError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($crate::messages::$request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::messages::ChannelError::Closed)?;

                response
                    .await
                    .map_err(|_| $crate::messages::ChannelError::Dropped)
            }
        }
    };
}
