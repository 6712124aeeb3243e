//! Scripted walk through a locator session.
//!
//! Uses built-in fixtures by default. Set `LOCATOR_DEMO_LIVE=1` to talk to
//! the service at `LOCATOR_API_BASE_URL` instead.

use std::env;
use std::sync::Arc;

use catalog::{Building, BuildingRef, CatalogItem, Category, Company, CompanyCategory, Room};
use foundation::{Coordinate, LngLat};
use locator::geolocation::FixedPosition;
use locator::{
    GeolocationProbe, HostBindings, LocatorConfig, LocatorEvent, LocatorSession, MapViewModel,
    PanelList, PointerId,
};
use parking_lot::Mutex;
use service::{DataService, HttpDataService, MemoryDataService, RouteGeometry};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match LocatorConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            warn!("invalid locator config, using defaults: {err}");
            LocatorConfig::default()
        }
    };

    let live = env::var("LOCATOR_DEMO_LIVE").is_ok_and(|v| v == "1");
    let service: Arc<dyn DataService> = if live {
        info!(base_url = %config.api_base_url, "using live data service");
        Arc::new(HttpDataService::new(config.api_base_url.clone()))
    } else {
        Arc::new(fixtures().await)
    };

    let session = match LocatorSession::new(&config, service, HostBindings::default()) {
        Ok(session) => session,
        Err(err) => {
            error!("locator config rejected: {err}");
            return;
        }
    }
    .with_geolocation(GeolocationProbe::new(Arc::new(FixedPosition(Ok(
        Coordinate::new(-30.0601, -51.1722),
    )))));

    let map = Arc::new(Mutex::new(MapViewModel::new(&config)));
    let sink = map.clone();
    session.subscribe(move |event| {
        sink.lock().apply(event);
        if let LocatorEvent::Notice(notice) = event {
            println!("! {notice}");
        }
    });

    session.measure_viewport(800.0);
    session.locate_user().await;

    let pointer = PointerId(1);
    session.drag_start(pointer, 720.0);
    session.drag_move(pointer, 300.0);
    session.drag_end(pointer);
    println!("panel expanded to {:.0}px", session.panel_height());

    for category in Category::ALL {
        if session.select_category(category).await.is_err() {
            continue;
        }
        print_list(category, &session.visible_list());
    }

    let _ = session.select_category(Category::Company).await;
    session.set_search("acme");
    if let PanelList::Companies(companies) = session.visible_list() {
        if let Some(company) = companies.into_iter().next() {
            let _ = session.request_route(company).await;
        }
    }

    let map = map.lock();
    println!(
        "route: {} points, panel {:.0}px, recenter control at {:.0}px",
        map.route().len(),
        map.panel_height(),
        map.recenter_offset()
    );
    for point in map.route() {
        println!("  {:.5}, {:.5}", point.lat, point.lng);
    }
}

fn print_list(category: Category, list: &PanelList) {
    println!("{} {} ({})", category.icon(), category.label(), list.len());
    let titles: Vec<String> = match list {
        PanelList::Buildings(v) => v.iter().map(CatalogItem::title).collect(),
        PanelList::Companies(v) => v.iter().map(CatalogItem::title).collect(),
        PanelList::Rooms(v) => v.iter().map(CatalogItem::title).collect(),
        PanelList::Areas(v) => v.iter().map(CatalogItem::title).collect(),
        PanelList::Products(v) => v.iter().map(CatalogItem::title).collect(),
        _ => Vec::new(),
    };
    for title in titles {
        println!("  {title}");
    }
}

async fn fixtures() -> MemoryDataService {
    let svc = MemoryDataService::new().with_route_responder(|req| {
        info!(destination = %req.destination_building_name, "fixture route");
        Ok(RouteGeometry {
            path: vec![
                LngLat::from(req.start),
                LngLat::new(-51.1712, -30.0594),
                LngLat::new(-51.1705, -30.0589),
            ],
        })
    });
    svc.set_buildings(vec![
        Building {
            id: "b32".into(),
            number: 32,
            campus: "Tecnopuc".into(),
            display_name: "Prédio 32".into(),
            wings: Vec::new(),
        },
        Building {
            id: "b-auditorio".into(),
            number: 0,
            campus: "Tecnopuc".into(),
            display_name: "Auditório".into(),
            wings: Vec::new(),
        },
    ])
    .await;
    svc.set_companies(vec![
        Company {
            id: "acme".into(),
            name: "Acme Software".into(),
            category: CompanyCategory {
                name: "Tecnologia".into(),
                sub_category: "Software".into(),
            },
            products: vec!["Café".into(), "Aplicativos".into()],
            building: Some(BuildingRef {
                display_name: "Prédio 32".into(),
            }),
        },
        Company {
            id: "saude".into(),
            name: "Clínica Saúde".into(),
            category: CompanyCategory {
                name: "Saúde".into(),
                sub_category: "Clínica".into(),
            },
            products: vec!["café".into()],
            building: None,
        },
    ])
    .await;
    svc.set_rooms(vec![Room {
        id: "r101".into(),
        identifier: "101".into(),
        building: BuildingRef {
            display_name: "Prédio 32".into(),
        },
    }])
    .await;
    svc
}
