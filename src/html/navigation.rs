use crate::entities::VenueListing;

use super::escape;

const HEAD: &str = r#"
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.2.0/dist/leaflet.css" />
<link rel="stylesheet" href="https://unpkg.com/leaflet-routing-machine@latest/dist/leaflet-routing-machine.css" />
<style>
  #map { width: 100%; height: 600px; }
  .leaflet-routing-container { max-height: 80px; font-size: 12px; }
  @media (max-width: 600px) {
    .leaflet-routing-container { max-height: 70px; font-size: 10px; }
  }
  .nav-controls { display: flex; flex-wrap: wrap; gap: 12px; align-items: center; margin-bottom: 12px; }
</style>
"#;

/// Executes directives returned by the navigation endpoints. The page owns no
/// navigation state of its own beyond the handles it was told to create.
const SCRIPT: &str = r#"
<script src="https://unpkg.com/leaflet@1.2.0/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet-routing-machine@latest/dist/leaflet-routing-machine.js"></script>
<script>
(function () {
  const map = L.map('map').fitWorld();
  L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors'
  }).addTo(map);

  const venueSelect = document.getElementById('venue');
  const startButton = document.getElementById('start-navigation');
  let sessionId = null;
  let marker = null;
  const controls = {};
  const watches = {};

  async function call(method, path, body) {
    const res = await fetch(path, {
      method: method,
      headers: { 'Content-Type': 'application/json' },
      body: body === undefined ? undefined : JSON.stringify(body)
    });
    const data = await res.json();
    if (!res.ok) {
      throw new Error(data.error || res.statusText);
    }
    return data;
  }

  function latLng(c) {
    return L.latLng(c.lat, c.lng);
  }

  function geolocationOptions(o) {
    return {
      enableHighAccuracy: o.enable_high_accuracy,
      timeout: o.timeout_ms,
      maximumAge: o.maximum_age_ms
    };
  }

  function reportPosition(subscription, position) {
    call('POST', '/navigation/' + sessionId + '/position', {
      subscription: subscription,
      position: {
        coordinates: { lat: position.coords.latitude, lng: position.coords.longitude },
        accuracy: position.coords.accuracy
      }
    }).then(apply).catch(console.error);
  }

  function reportError(subscription, error) {
    call('POST', '/navigation/' + sessionId + '/location_error', {
      subscription: subscription,
      code: error.code,
      message: error.message
    }).then(apply).catch(console.error);
  }

  function reportRoutes(controlId, routes) {
    call('POST', '/navigation/' + sessionId + '/routes', {
      control_id: controlId,
      routes: routes.map(function (route) {
        return {
          name: route.name,
          total_distance: route.summary ? route.summary.totalDistance : null,
          total_time: route.summary ? route.summary.totalTime : null,
          instructions: (route.instructions || []).map(function (i) {
            return { text: i.text, distance: i.distance, time: i.time };
          })
        };
      })
    }).then(apply).catch(console.error);
  }

  function apply(directives) {
    directives.forEach(function (d) {
      switch (d.name) {
        case 'watch_position':
          watches[d.subscription] = navigator.geolocation.watchPosition(
            function (p) { reportPosition(d.subscription, p); },
            function (e) { reportError(d.subscription, e); },
            geolocationOptions(d.options));
          break;
        case 'locate_once':
          navigator.geolocation.getCurrentPosition(
            function (p) { reportPosition(d.subscription, p); },
            function (e) { reportError(d.subscription, e); },
            geolocationOptions(d.options));
          break;
        case 'clear_watch':
          if (d.subscription in watches) {
            navigator.geolocation.clearWatch(watches[d.subscription]);
            delete watches[d.subscription];
          }
          break;
        case 'place_marker': {
          const label = document.createElement('span');
          label.textContent = d.label;
          if (marker) {
            marker.setLatLng(latLng(d.coordinates));
          } else {
            marker = L.marker(latLng(d.coordinates)).addTo(map);
          }
          marker.bindPopup(label);
          break;
        }
        case 'create_route_control': {
          const c = d.control;
          const control = L.Routing.control({
            waypoints: [latLng(c.waypoints.origin), latLng(c.waypoints.destination)],
            routeWhileDragging: c.options.route_while_dragging,
            addWaypoints: c.options.add_waypoints,
            showAlternatives: c.options.show_alternatives,
            fitSelectedRoutes: c.options.fit_selected_routes
          }).addTo(map);
          control.on('routesfound', function (e) { reportRoutes(c.id, e.routes); });
          controls[c.id] = control;
          break;
        }
        case 'set_waypoints':
          if (controls[d.control_id]) {
            controls[d.control_id].setWaypoints([latLng(d.waypoints.origin), latLng(d.waypoints.destination)]);
          }
          break;
        case 'remove_route_control':
          if (controls[d.control_id]) {
            map.removeControl(controls[d.control_id]);
            delete controls[d.control_id];
          }
          break;
        case 'cancel_speech':
          window.speechSynthesis.cancel();
          break;
        case 'speak':
          window.speechSynthesis.speak(new SpeechSynthesisUtterance(d.text));
          break;
        case 'alert':
          alert(d.message);
          break;
      }
    });
  }

  function selectedMode() {
    const checked = document.querySelector('input[name="mode"]:checked');
    return checked ? checked.value : 'tracking';
  }

  startButton.addEventListener('click', function () {
    if (sessionId) {
      call('PATCH', '/navigation/' + sessionId + '/venue', { venue: venueSelect.value })
        .then(apply).catch(function (e) { alert(e.message); });
      return;
    }
    call('POST', '/navigation', { venue: venueSelect.value, mode: selectedMode() })
      .then(function (data) {
        sessionId = data.session.id;
        startButton.textContent = 'Switch destination';
        apply(data.directives);
      })
      .catch(function (e) { alert(e.message); });
  });

  window.addEventListener('pagehide', function () {
    if (sessionId) {
      fetch('/navigation/' + sessionId, { method: 'DELETE', keepalive: true });
    }
  });
})();
</script>
"#;

pub fn render(venues: &[VenueListing]) -> String {
    let options: String = venues
        .iter()
        .map(|venue| {
            let name = escape(&venue.name);
            format!(r#"<option value="{}">{}</option>"#, name, name)
        })
        .collect();

    format!(
        r#"{head}
<h1 style="text-align: center;">Navigate to the Wedding Venues 📍</h1>
<h3>📌 Select a destination below to begin navigation:</h3>
<div class="nav-controls">
  <label for="venue">Choose a destination</label>
  <select id="venue">{options}</select>
  <label><input type="radio" name="mode" value="tracking" checked /> Live tracking</label>
  <label><input type="radio" name="mode" value="one_shot" /> Locate once</label>
  <button id="start-navigation" type="button">Start navigation</button>
</div>
<div id="map"></div>
{script}"#,
        head = HEAD,
        options = options,
        script = SCRIPT,
    )
}

#[test]
fn venue_options_in_table_order() {
    use crate::entities::Venue;

    let venues: Vec<VenueListing> = Venue::ALL.iter().copied().map(Into::into).collect();
    let html = render(&venues);

    let traditional = html.find("Traditional Marriage").unwrap();
    let saftec = html.find(r#"<option value="SAFTEC Hotels">"#).unwrap();
    let whitehills = html.find("WhiteHills Luxery Hotel").unwrap();

    assert!(traditional < saftec && saftec < whitehills);
    assert!(html.contains("leaflet-routing-machine.js"));
}
