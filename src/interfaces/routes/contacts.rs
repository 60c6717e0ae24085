use actix_web::web;

use crate::handlers::contact_me;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contacts")
            .service(
                web::resource("")
                    .route(web::get().to(contact_me::list_contact_messages))
                    .route(web::post().to(contact_me::create_contact_me))
            )
            .service(
                web::resource("/{message_id}")
                    .route(web::get().to(contact_me::get_contact_message))
                    .route(web::delete().to(contact_me::delete_contact_message))
            )
            .service(
                web::resource("/{message_id}/read")
                    .route(web::put().to(contact_me::mark_contact_message_read))
            )
    );
}
