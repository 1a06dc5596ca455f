/// HTML templates for the browser pages
///
/// Each page is a thin shell over the JSON API: the server renders the frame
/// and a small script per page does the fetching. Content functions return
/// raw strings so CSS/JS braces never meet the format! machinery.

/// Base HTML template with navigation and common styles
pub fn base_template(title: &str, active_tab: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Waypost</title>
    <style>
        {common_styles}
    </style>
</head>
<body>
    <div class="header">
        <h1>📍 Waypost</h1>
    </div>

    <nav class="tabs">
        {nav_tabs}
    </nav>

    <main class="content">
        {content}
    </main>

    <footer class="footer">
        <p>Waypost v0.1.0</p>
    </footer>

    <script>
        {common_scripts}
    </script>
</body>
</html>"#,
        title = title,
        common_styles = common_styles(),
        nav_tabs = nav_tabs(active_tab),
        content = content,
        common_scripts = common_scripts()
    )
}

/// Common CSS styles
fn common_styles() -> &'static str {
    r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f5f7fa; color: #2d3748; line-height: 1.6;
        }
        .header {
            background: linear-gradient(135deg, #2f855a 0%, #276749 100%);
            color: white; padding: 18px 30px;
        }
        .header h1 { font-size: 1.6em; font-weight: 600; }
        .tabs {
            background: white; padding: 0 30px; display: flex; gap: 4px;
            border-bottom: 1px solid #e2e8f0;
        }
        .tabs a {
            padding: 12px 16px; text-decoration: none; color: #4a5568;
            border-bottom: 2px solid transparent;
        }
        .tabs a.active { color: #2f855a; border-bottom-color: #2f855a; }
        .content { max-width: 760px; margin: 24px auto; padding: 0 16px; }
        .card {
            background: white; border-radius: 8px; padding: 20px;
            margin-bottom: 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.08);
        }
        input, select, textarea {
            width: 100%; padding: 8px 10px; margin: 6px 0 12px;
            border: 1px solid #cbd5e0; border-radius: 6px; font-size: 1em;
        }
        button {
            background: #2f855a; color: white; border: none; border-radius: 6px;
            padding: 10px 18px; font-size: 1em; cursor: pointer;
        }
        button:disabled { background: #a0aec0; cursor: wait; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid #edf2f7; }
        .notice { color: #718096; font-size: 0.9em; }
        .error { color: #c53030; }
        .footer { text-align: center; color: #a0aec0; padding: 24px; font-size: 0.85em; }
    "#
}

/// Navigation tabs with the active one highlighted
fn nav_tabs(active_tab: &str) -> String {
    let tabs = [
        ("home", "/", "Home"),
        ("check-in", "/check-in", "Check In"),
        ("leaderboard", "/leaderboard", "Leaderboard"),
        ("profile", "/profile", "Profile"),
    ];

    tabs.iter()
        .map(|(key, href, label)| {
            let class = if *key == active_tab { " class=\"active\"" } else { "" };
            format!("<a href=\"{}\"{}>{}</a>", href, class, label)
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

/// Shared fetch helpers
fn common_scripts() -> &'static str {
    r#"
        async function api(path, options = {}) {
            options.headers = Object.assign({'Content-Type': 'application/json'}, options.headers);
            const res = await fetch('/api' + path, options);
            const body = await res.json();
            if (!body.success) { throw new Error(body.error || 'Request failed'); }
            return body.data;
        }
        function showError(el, err) {
            el.textContent = err.message || String(err);
            el.classList.add('error');
        }
    "#
}

/// Sign-in page: register or log in by username
pub fn auth_content() -> &'static str {
    r#"
    <div class="card">
        <h2>Sign in to Waypost</h2>
        <p class="notice">Pick a username to register, or sign back in.</p>
        <input id="username" placeholder="username" autocomplete="username">
        <button onclick="submitAuth('/auth/login')">Sign In</button>
        <button onclick="submitAuth('/auth/register')">Register</button>
        <p id="authMessage"></p>
    </div>
    <script>
        async function submitAuth(path) {
            const username = document.getElementById('username').value;
            try {
                await api(path, {method: 'POST', body: JSON.stringify({username})});
                window.location.href = '/';
            } catch (err) {
                showError(document.getElementById('authMessage'), err);
            }
        }
    </script>
    "#
}

/// Home page: profile summary and recent check-ins
pub fn home_content() -> &'static str {
    r#"
    <div class="card">
        <h2 id="welcome">Welcome</h2>
        <p id="stats" class="notice"></p>
    </div>
    <div class="card">
        <h3>Recent check-ins</h3>
        <table id="recent"><tbody></tbody></table>
    </div>
    <script>
        (async () => {
            const me = await api('/auth/me');
            document.getElementById('welcome').textContent = 'Welcome, ' + me.username;
            document.getElementById('stats').textContent =
                me.total_check_ins + ' check-ins · ' + me.total_badges + ' badges · ' +
                me.unique_venues + ' venues';
            const checkIns = await api('/check-ins/' + me.id + '?limit=10');
            const tbody = document.querySelector('#recent tbody');
            for (const c of checkIns) {
                const row = tbody.insertRow();
                row.insertCell().textContent = c.venue_name;
                row.insertCell().textContent = c.venue_type;
                row.insertCell().textContent = c.check_in_time;
            }
        })().catch(console.error);
    </script>
    "#
}

/// Check-in page: manual form plus nearby-venue lookup
pub fn check_in_content() -> &'static str {
    r#"
    <div class="card">
        <h2>Check in</h2>
        <button onclick="findNearby()">Find places near me</button>
        <select id="nearby" onchange="pickNearby()" hidden></select>
        <input id="venue_name" placeholder="Venue name">
        <input id="venue_type" placeholder="Venue type (Cafe, Bar, ...)">
        <input id="location" placeholder="Address or lat,lng">
        <textarea id="notes" placeholder="Notes (optional)"></textarea>
        <button id="submitBtn" onclick="submitCheckIn()">Check In</button>
        <p id="checkInMessage"></p>
    </div>
    <script>
        // In-flight flag is the only duplicate-submission guard
        let submitting = false;

        async function submitCheckIn() {
            if (submitting) return;
            submitting = true;
            const btn = document.getElementById('submitBtn');
            btn.disabled = true;
            const msg = document.getElementById('checkInMessage');
            msg.textContent = '';
            msg.classList.remove('error');
            try {
                const data = await api('/check-ins', {method: 'POST', body: JSON.stringify({
                    venue_name: document.getElementById('venue_name').value,
                    venue_type: document.getElementById('venue_type').value,
                    location: document.getElementById('location').value,
                    check_in_time: new Date().toISOString(),
                    notes: document.getElementById('notes').value || null,
                })});
                msg.textContent = data.badge_awarded
                    ? 'Checked in! Badge earned: ' + data.badge_awarded
                    : 'Checked in!';
            } catch (err) {
                showError(msg, err);
            } finally {
                submitting = false;
                btn.disabled = false;
            }
        }

        function findNearby() {
            navigator.geolocation.getCurrentPosition(async (pos) => {
                const q = 'lat=' + pos.coords.latitude + '&lng=' + pos.coords.longitude;
                try {
                    const places = await api('/places/nearby?' + q);
                    const select = document.getElementById('nearby');
                    select.hidden = false;
                    select.innerHTML = '<option value="">Pick a nearby place…</option>';
                    for (const p of places) {
                        const opt = document.createElement('option');
                        opt.value = JSON.stringify(p);
                        opt.textContent = p.name + ' (' + Math.round(p.distance_m) + 'm)';
                        select.appendChild(opt);
                    }
                } catch (err) {
                    showError(document.getElementById('checkInMessage'), err);
                }
            });
        }

        function pickNearby() {
            const value = document.getElementById('nearby').value;
            if (!value) return;
            const p = JSON.parse(value);
            document.getElementById('venue_name').value = p.name;
            document.getElementById('venue_type').value = (p.types && p.types[0]) || '';
            document.getElementById('location').value = p.address || (p.latitude + ',' + p.longitude);
        }
    </script>
    "#
}

/// Leaderboard page with a fixed-interval poll
pub fn leaderboard_content() -> &'static str {
    r#"
    <div class="card">
        <h2>Leaderboard</h2>
        <table id="board">
            <thead><tr><th>#</th><th>User</th><th>Check-ins</th><th>Badges</th><th>Venues</th></tr></thead>
            <tbody></tbody>
        </table>
    </div>
    <script>
        async function refreshBoard() {
            const entries = await api('/leaderboard');
            const tbody = document.querySelector('#board tbody');
            tbody.innerHTML = '';
            for (const e of entries) {
                const row = tbody.insertRow();
                row.insertCell().textContent = e.rank;
                row.insertCell().textContent = e.username;
                row.insertCell().textContent = e.total_check_ins;
                row.insertCell().textContent = e.total_badges;
                row.insertCell().textContent = e.unique_venues;
            }
        }
        refreshBoard().catch(console.error);
        setInterval(() => refreshBoard().catch(console.error), 30000);
    </script>
    "#
}

/// Profile page: badges and history for the signed-in user
pub fn profile_content() -> &'static str {
    r#"
    <div class="card">
        <h2 id="profileName">Profile</h2>
        <p id="profileStats" class="notice"></p>
        <button onclick="signOut()">Sign out</button>
    </div>
    <div class="card">
        <h3>Badges</h3>
        <ul id="badges"></ul>
    </div>
    <script>
        (async () => {
            const me = await api('/auth/me');
            const data = await api('/profiles/' + me.id);
            document.getElementById('profileName').textContent = data.profile.username;
            document.getElementById('profileStats').textContent =
                data.profile.total_check_ins + ' check-ins · ' +
                data.profile.unique_venues + ' unique venues';
            const list = document.getElementById('badges');
            for (const b of data.badges) {
                const item = document.createElement('li');
                item.textContent = b.icon + ' ' + b.badge_type + ' · ' + b.venue_name;
                list.appendChild(item);
            }
        })().catch(console.error);

        async function signOut() {
            await api('/auth/logout', {method: 'POST'});
            window.location.href = '/auth';
        }
    </script>
    "#
}
