use crate::models::{Exercise, ExerciseInfo, Person, StateView};

/// Renders the checklist page with the current state embedded, so the first
/// paint needs no extra request. The script re-renders from `/api/state`.
pub fn render_index(view: &StateView) -> Result<String, serde_json::Error> {
    let exercises: Vec<ExerciseInfo> = Exercise::ALL.into_iter().map(ExerciseInfo::from).collect();
    Ok(INDEX_HTML
        .replace("{{DAY}}", &view.state.day().to_string())
        .replace("{{DATE}}", &view.date)
        .replace("{{MALE_LABEL}}", Person::A.label())
        .replace("{{FEMALE_LABEL}}", Person::B.label())
        .replace("{{EXERCISES}}", &script_json(&exercises)?)
        .replace("{{STATE}}", &script_json(view)?))
}

fn script_json(value: &impl serde::Serialize) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="de">
<head>
  <meta charset="utf-8">
  <title>Workout</title>
  <meta name="viewport" content="width=device-width, initial-scale=1, viewport-fit=cover">
  <style>
    :root {
      --male-bg: #e9f2ff; --male-border: #6aa6ff; --male-accent: #2c6cff;
      --female-bg: #ffe9f4; --female-border: #ff86b7; --female-accent: #e33682;
      --ok: #16a34a; --muted: #666;
    }
    html, body { height: 100%; }
    body {
      font-family: Arial, Helvetica, sans-serif;
      padding: 24px;
      background: #fafafa;
      color: #111;
      -webkit-text-size-adjust: 100%;
    }
    h1 { margin: 0 0 6px; }
    .muted { color: var(--muted); font-size: 0.95em; margin: 4px 0 16px; }
    .container { display: flex; gap: 20px; flex-wrap: wrap; }
    .panel {
      border: 2px solid #ddd;
      border-radius: 12px;
      padding: 18px;
      width: 340px;
      background: white;
    }
    .panel.male { background: var(--male-bg); border-color: var(--male-border); }
    .panel.female { background: var(--female-bg); border-color: var(--female-border); }
    .panel h2 { margin: 0 0 10px; font-size: 1.4rem; }
    .exercise {
      display: flex;
      align-items: center;
      gap: 14px;
      margin: 12px 0;
      padding: 12px 10px;
      cursor: pointer;
      user-select: none;
      -webkit-tap-highlight-color: transparent;
      touch-action: manipulation;
      border-radius: 10px;
    }
    .readonly .exercise { opacity: .6; pointer-events: none; }
    .check { font-weight: bold; color: var(--ok); font-size: 36px; line-height: 1; }
    .chip { display: inline-block; padding: 6px 10px; border-radius: 999px; font-size: .95rem; font-weight: 600; }
    .chip.male { background: rgba(44, 108, 255, .12); color: var(--male-accent); border: 1px solid var(--male-border); }
    .chip.female { background: rgba(227, 54, 130, .12); color: var(--female-accent); border: 1px solid var(--female-border); }
    .status { margin: 10px 0 16px; font-size: .95rem; }
    .status .done { color: var(--ok); font-weight: 700; }
    .status .wait { color: #b45309; font-weight: 700; }
    button {
      padding: 12px 16px;
      border-radius: 12px;
      border: 1px solid #ccc;
      background: #fff;
      cursor: pointer;
      font-size: 1rem;
      min-height: 48px;
      touch-action: manipulation;
    }
    .disabled { opacity: .5; pointer-events: none; }
    @media (max-width: 768px) {
      body { padding: 18px; font-size: 18px; line-height: 1.35; }
      h1 { font-size: 2rem; }
      .container { flex-direction: column; gap: 16px; }
      .panel { width: 100%; max-width: none; }
      .exercise { padding: 14px 12px; font-size: 1.15rem; }
      .check { font-size: 42px; }
      button { width: 100%; font-size: 1.1rem; }
    }
  </style>
</head>
<body>
  <h1>Workout</h1>
  <div class="muted">Datum: <span id="date">{{DATE}}</span></div>
  <div>Aktueller Tag: <span id="day">{{DAY}}</span></div>
  <div id="overallStatus" class="status"></div>

  <div class="container">
    <div class="panel male">
      <h2><span class="chip male">{{MALE_LABEL}}</span></h2>
      <div id="maleExercises"></div>
    </div>
    <div class="panel female">
      <h2><span class="chip female">{{FEMALE_LABEL}}</span></h2>
      <div id="femaleExercises"></div>
    </div>
  </div>

  <div style="margin-top:18px">
    <button id="nextDayBtn" class="disabled">Nächster Tag</button>
  </div>

  <script>
    const exercises = {{EXERCISES}};
    const initialState = {{STATE}};

    const params = new URLSearchParams(window.location.search);
    const view = (params.get('view') || '').toLowerCase();
    const clickableFor = view === 'mann' ? 'male' : view === 'frau' ? 'female' : '';

    const statusText = {
      both: '<span class="done">Beide fertig.</span> Weiter geht’s morgen.',
      male_only: '<span class="done">Mann ist fertig</span> · <span class="wait">Frau zögert noch.</span>',
      female_only: '<span class="done">Frau ist fertig</span> · <span class="wait">Mann zögert noch.</span>',
      nobody: 'Niemand fertig. Alle tun so, als wäre Stretching schon Training.'
    };

    const toggle = async (person, exercise) => {
      const res = await fetch('/api/toggle', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ person, exercise })
      });
      if (res.ok) {
        render(await res.json());
      } else {
        await load();
      }
    };

    const renderPerson = (containerId, person, s) => {
      const cont = document.getElementById(containerId);
      const panel = cont.parentElement;
      const readOnly = clickableFor !== '' && clickableFor !== person;
      panel.classList.toggle('readonly', readOnly);
      cont.innerHTML = '';

      exercises.forEach((e) => {
        const row = document.createElement('div');
        row.className = 'exercise';
        const label = document.createElement('span');
        if (s[person][e.key]) {
          label.className = 'check';
          label.textContent = '✓';
        } else {
          label.textContent = `${s.day} ${e.label}`;
        }
        if (!readOnly) {
          row.addEventListener('click', () => toggle(person, e.key), { passive: true });
        }
        row.appendChild(label);
        cont.appendChild(row);
      });
    };

    const render = (s) => {
      document.getElementById('day').textContent = s.day;
      document.getElementById('date').textContent = s.date;
      renderPerson('maleExercises', 'male', s);
      renderPerson('femaleExercises', 'female', s);
      document.getElementById('nextDayBtn').classList.toggle('disabled', !s.can_advance);
      document.getElementById('overallStatus').innerHTML = statusText[s.status] || '';
    };

    const load = async () => {
      const res = await fetch('/api/state');
      if (res.ok) {
        render(await res.json());
      }
    };

    document.getElementById('nextDayBtn').addEventListener('click', async () => {
      const btn = document.getElementById('nextDayBtn');
      if (btn.classList.contains('disabled')) {
        return;
      }
      const res = await fetch('/api/next_day', { method: 'POST' });
      if (res.ok) {
        render(await res.json());
      } else {
        alert('Nicht abgeschlossen!');
        await load();
      }
    });

    render(initialState);
    setInterval(load, 5000);
    document.addEventListener('visibilitychange', () => {
      if (!document.hidden) {
        load();
      }
    });
  </script>
</body>
</html>
"#;
