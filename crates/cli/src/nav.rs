//! Footer navigation view.
//!
//! A fixed, ordered set of icon links whose visibility depends on the
//! current login state. The state is read fresh from the client on every
//! render pass - nothing is cached between renders, so a re-render after an
//! auth transition always reflects the new state.

use clipjoint_client::BookingClient;

/// One footer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Destination route.
    pub route: &'static str,
    /// Icon name (matches the web client's image assets).
    pub icon: &'static str,
    /// Accessible label.
    pub label: &'static str,
}

/// "Appointments" - logged-in only.
const APPOINTMENTS: NavLink = NavLink {
    route: "/appointments",
    icon: "calendar",
    label: "Appointments",
};

/// "Add barbershop" - logged-in only.
const ADD_BARBERSHOP: NavLink = NavLink {
    route: "/barbershop",
    icon: "add",
    label: "Add barbershop",
};

/// "Home" - always visible.
const HOME: NavLink = NavLink {
    route: "/",
    icon: "home",
    label: "Home",
};

/// "Login" - logged-out only.
const LOGIN: NavLink = NavLink {
    route: "/login",
    icon: "login",
    label: "Login",
};

/// "Logout" - logged-in only; activating it logs out and lands on Home.
const LOGOUT: NavLink = NavLink {
    route: "/",
    icon: "logout",
    label: "Logout",
};

/// Compute the visible footer links, in their fixed order.
#[must_use]
pub fn footer_links(logged_in: bool) -> Vec<NavLink> {
    let mut links = Vec::with_capacity(4);

    if logged_in {
        links.push(APPOINTMENTS);
        links.push(ADD_BARBERSHOP);
    }
    links.push(HOME);
    if !logged_in {
        links.push(LOGIN);
    }
    if logged_in {
        links.push(LOGOUT);
    }

    links
}

/// Render the footer for the client's current login state.
///
/// Login state is queried at call time, never cached.
#[allow(clippy::print_stdout)]
pub fn render(client: &BookingClient) {
    let links = footer_links(client.is_logged_in());

    let rendered: Vec<String> = links
        .iter()
        .map(|link| format!("[{}] {} -> {}", link.icon, link.label, link.route))
        .collect();

    println!("{}", rendered.join("\n"));
}
