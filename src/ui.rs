pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg-1: #0f1a1c;
      --bg-2: #16282b;
      --ink: #e8f0ee;
      --muted: #8fa6a0;
      --accent: #14b8a6;
      --accent-soft: rgba(20, 184, 166, 0.16);
      --card: #132124;
      --line: rgba(143, 166, 160, 0.18);
      --danger: #e4604e;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top right, var(--bg-2), transparent 55%), var(--bg-1);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-size: clamp(1.6rem, 3.5vw, 2.2rem);
      font-weight: 600;
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    .month-nav {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .month-nav span {
      min-width: 150px;
      text-align: center;
      font-weight: 600;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 20px;
      display: grid;
      gap: 14px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    button {
      appearance: none;
      border: 1px solid var(--line);
      border-radius: 12px;
      background: transparent;
      color: var(--ink);
      padding: 9px 14px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 120ms ease, background 120ms ease;
    }

    button:active {
      transform: scale(0.97);
    }

    .habit-toggles {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
      gap: 10px;
    }

    .habit-toggle {
      display: flex;
      align-items: center;
      gap: 10px;
      text-align: left;
    }

    .habit-toggle.done {
      background: var(--accent-soft);
      border-color: var(--accent);
    }

    .habit-toggle .mark {
      margin-left: auto;
      color: var(--accent);
      opacity: 0;
    }

    .habit-toggle.done .mark {
      opacity: 1;
    }

    .progress-row {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      color: var(--muted);
      font-size: 0.95rem;
    }

    .progress-row strong {
      color: var(--ink);
    }

    .bar {
      height: 8px;
      border-radius: 999px;
      background: rgba(143, 166, 160, 0.2);
      overflow: hidden;
    }

    .bar div {
      height: 100%;
      background: var(--accent);
      width: 0;
      transition: width 250ms ease;
    }

    .scale {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      align-items: center;
    }

    .scale .label {
      width: 92px;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .scale button {
      padding: 6px 10px;
      min-width: 34px;
    }

    .scale button.active {
      background: var(--accent-soft);
      border-color: var(--accent);
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .calendar .dow {
      text-align: center;
      color: var(--muted);
      font-size: 0.8rem;
      padding-bottom: 4px;
    }

    .cell {
      aspect-ratio: 1;
      border-radius: 10px;
      border: 1px solid var(--line);
      display: grid;
      place-items: center;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .cell.today {
      border-color: var(--accent);
      color: var(--ink);
    }

    .cell.future {
      opacity: 0.35;
    }

    .tabs {
      display: flex;
      gap: 6px;
    }

    .tab.active {
      background: var(--accent-soft);
      border-color: var(--accent);
    }

    #chart {
      width: 100%;
      height: 240px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2.5;
    }

    .chart-line.second {
      stroke: #8b5cf6;
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 10px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.95rem;
    }

    th, td {
      text-align: left;
      padding: 8px 6px;
      border-bottom: 1px solid var(--line);
    }

    th {
      color: var(--muted);
      font-weight: 500;
      font-size: 0.85rem;
    }

    td.num, th.num {
      text-align: right;
    }

    .delete {
      color: var(--danger);
      border-color: transparent;
      padding: 4px 8px;
    }

    form.add-habit {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    form.add-habit input {
      background: transparent;
      border: 1px solid var(--line);
      border-radius: 12px;
      color: var(--ink);
      padding: 9px 12px;
      font-family: inherit;
      font-size: 0.95rem;
    }

    form.add-habit input[name="name"] {
      flex: 1 1 180px;
    }

    form.add-habit input[name="icon"] {
      width: 70px;
    }

    form.add-habit input[name="goal"] {
      width: 80px;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: var(--accent);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Habit Tracker</h1>
        <p class="subtitle">Today is {{DATE}}</p>
      </div>
      <div class="month-nav">
        <button id="prev-month" type="button">&larr;</button>
        <span id="month-label"></span>
        <button id="next-month" type="button">&rarr;</button>
      </div>
    </header>

    <section class="card">
      <h2>Today</h2>
      <div id="habit-toggles" class="habit-toggles"></div>
      <div class="progress-row">
        <span>Done today: <strong id="today-done">0 / 0</strong></span>
        <span>Daily progress: <strong id="today-pct">0%</strong></span>
      </div>
      <div class="bar"><div id="today-bar"></div></div>
      <div class="scale">
        <span class="label">Mood</span>
        <span id="mood-scale"></span>
      </div>
      <div class="scale">
        <span class="label">Motivation</span>
        <span id="motivation-scale"></span>
      </div>
    </section>

    <section class="card">
      <h2 id="overall-title">This month</h2>
      <div class="progress-row">
        <span>Completions: <strong id="overall-done">0 / 0</strong></span>
        <span>Goal attainment: <strong id="overall-pct">0%</strong></span>
      </div>
      <div class="bar"><div id="overall-bar"></div></div>
      <div class="calendar" id="calendar"></div>
    </section>

    <section class="card">
      <div class="tabs" role="tablist">
        <button class="tab active" type="button" data-tab="progress" role="tab">Daily completion</button>
        <button class="tab" type="button" data-tab="mental" role="tab">Mood &amp; motivation</button>
      </div>
      <svg id="chart" viewBox="0 0 640 240" role="img" aria-label="Monthly chart"></svg>
    </section>

    <section class="card">
      <h2>Habits</h2>
      <table>
        <thead>
          <tr>
            <th>Habit</th>
            <th class="num">Done</th>
            <th class="num">Goal</th>
            <th class="num">Progress</th>
            <th class="num">Streak</th>
            <th></th>
          </tr>
        </thead>
        <tbody id="analysis-body"></tbody>
      </table>
      <form class="add-habit" id="add-form">
        <input name="name" placeholder="New habit" required />
        <input name="icon" placeholder="Icon" value="&#11088;" />
        <input name="goal" type="number" min="1" max="31" value="30" />
        <button type="submit">Add</button>
      </form>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const monthLabelEl = document.getElementById('month-label');
    const togglesEl = document.getElementById('habit-toggles');
    const calendarEl = document.getElementById('calendar');
    const chartEl = document.getElementById('chart');
    const analysisEl = document.getElementById('analysis-body');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let view = null;       // { year, month }
    let stats = null;
    let todayData = null;
    let habits = [];
    let activeTab = 'progress';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      return res.json();
    };

    const post = (path, body) => api(path, {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body)
    });

    const todayRecord = () => {
      const done = {};
      habits.forEach((habit) => { done[habit.id] = false; });
      return done;
    };

    const renderToday = (completions) => {
      const todayKey = stats ? stats.today : null;
      const done = (completions && completions[todayKey] && completions[todayKey].habits) || todayRecord();
      togglesEl.innerHTML = '';
      habits.forEach((habit) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.className = 'habit-toggle' + (done[habit.id] ? ' done' : '');
        button.innerHTML = `<span>${habit.icon}</span><span>${habit.name}</span><span class="mark">&#10003;</span>`;
        button.style.borderLeft = `4px solid ${habit.color}`;
        button.addEventListener('click', () => {
          post('/api/completions/toggle', { habit_id: habit.id })
            .then(refresh)
            .catch((err) => setStatus(err.message, 'error'));
        });
        togglesEl.appendChild(button);
      });

      document.getElementById('today-done').textContent =
        `${todayData.daily.completed} / ${todayData.daily.total}`;
      document.getElementById('today-pct').textContent = `${todayData.daily.percentage}%`;
      document.getElementById('today-bar').style.width = `${todayData.daily.percentage}%`;

      renderScale('mood-scale', 'mood', todayData.mood);
      renderScale('motivation-scale', 'motivation', todayData.motivation);
    };

    const renderScale = (elementId, field, current) => {
      const container = document.getElementById(elementId);
      container.innerHTML = '';
      for (let value = 1; value <= 10; value += 1) {
        const button = document.createElement('button');
        button.type = 'button';
        button.textContent = value;
        if (value === current) {
          button.classList.add('active');
        }
        button.addEventListener('click', () => {
          post('/api/mental-state', { [field]: value })
            .then(refresh)
            .catch((err) => setStatus(err.message, 'error'));
        });
        container.appendChild(button);
      }
    };

    const renderCalendar = () => {
      calendarEl.innerHTML = '';
      ['Mo', 'Tu', 'We', 'Th', 'Fr', 'Sa', 'Su'].forEach((name) => {
        const dow = document.createElement('span');
        dow.className = 'dow';
        dow.textContent = name;
        calendarEl.appendChild(dow);
      });
      for (let blank = 0; blank < stats.leading_blanks; blank += 1) {
        calendarEl.appendChild(document.createElement('span'));
      }
      stats.days.forEach((day) => {
        const cell = document.createElement('span');
        const isFuture = day.date > stats.today;
        cell.className = 'cell'
          + (day.date === stats.today ? ' today' : '')
          + (isFuture ? ' future' : '');
        cell.textContent = day.day;
        if (!isFuture && day.total > 0) {
          cell.style.background = `rgba(20, 184, 166, ${day.percentage / 160})`;
        }
        cell.title = `${day.date}: ${day.completed}/${day.total}`;
        calendarEl.appendChild(cell);
      });
    };

    const renderChart = () => {
      const series = [];
      if (activeTab === 'progress') {
        series.push({
          cls: 'chart-line',
          points: stats.days.map((day) => ({ label: day.day, value: day.percentage }))
        });
      } else {
        series.push({
          cls: 'chart-line',
          points: stats.mental_state.map((day) => ({ label: day.day, value: day.mood }))
        });
        series.push({
          cls: 'chart-line second',
          points: stats.mental_state.map((day) => ({ label: day.day, value: day.motivation }))
        });
      }

      const width = 640;
      const height = 240;
      const padX = 34;
      const padY = 28;
      const max = activeTab === 'progress' ? 100 : 10;
      const count = stats.days.length;
      const xStep = count > 1 ? (width - padX * 2) / (count - 1) : 0;
      const x = (index) => padX + index * xStep;
      const y = (value) => height - padY - (value / max) * (height - padY * 2);

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = (max * i) / 4;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${padX}" y1="${yPos}" x2="${width - padX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${padX - 8}" y="${yPos + 3}" text-anchor="end">${value}</text>`;
      }

      const labelEvery = count > 15 ? 5 : 2;
      let labels = '';
      stats.days.forEach((day, index) => {
        if ((day.day - 1) % labelEvery === 0) {
          labels += `<text class="chart-label" x="${x(index)}" y="${height - padY + 16}" text-anchor="middle">${day.day}</text>`;
        }
      });

      let paths = '';
      series.forEach((line) => {
        let d = '';
        line.points.forEach((point, index) => {
          if (point.value === null || point.value === undefined) {
            return;
          }
          d += `${d === '' ? 'M' : 'L'} ${x(index).toFixed(1)} ${y(point.value).toFixed(1)} `;
        });
        if (d !== '') {
          paths += `<path class="${line.cls}" d="${d.trim()}" />`;
        }
      });

      chartEl.innerHTML = grid + paths + labels;
    };

    const renderAnalysis = () => {
      analysisEl.innerHTML = '';
      stats.analysis.forEach((row) => {
        const tr = document.createElement('tr');
        tr.innerHTML = `
          <td>${row.icon} ${row.name}</td>
          <td class="num">${row.actual}</td>
          <td class="num">${row.goal}</td>
          <td class="num">${row.progress}%</td>
          <td class="num">${row.streak}</td>
          <td class="num"><button class="delete" type="button">&times;</button></td>
        `;
        tr.querySelector('.delete').addEventListener('click', () => {
          api(`/api/habits/${row.id}`, { method: 'DELETE' })
            .then(refresh)
            .catch((err) => setStatus(err.message, 'error'));
        });
        analysisEl.appendChild(tr);
      });
    };

    const renderAll = (completions) => {
      monthLabelEl.textContent = `${stats.month_name} ${stats.year}`;
      document.getElementById('overall-done').textContent =
        `${stats.overall.completed} / ${stats.overall.total}`;
      document.getElementById('overall-pct').textContent = `${stats.overall.percentage}%`;
      document.getElementById('overall-bar').style.width = `${stats.overall.percentage}%`;
      renderToday(completions);
      renderCalendar();
      renderChart();
      renderAnalysis();
    };

    const refresh = async () => {
      const statsPath = view
        ? `/api/stats?year=${view.year}&month=${view.month}`
        : '/api/stats';
      const [statsData, today, habitList, completions] = await Promise.all([
        api(statsPath),
        api('/api/today'),
        api('/api/habits'),
        api('/api/completions')
      ]);
      stats = statsData;
      todayData = today;
      habits = habitList;
      if (!view) {
        view = { year: stats.year, month: stats.month };
      }
      renderAll(completions);
    };

    const shiftMonth = (delta) => {
      if (!view) {
        return;
      }
      let month = view.month + delta;
      let year = view.year;
      if (month < 1) {
        month = 12;
        year -= 1;
      } else if (month > 12) {
        month = 1;
        year += 1;
      }
      view = { year, month };
      refresh().catch((err) => setStatus(err.message, 'error'));
    };

    document.getElementById('prev-month').addEventListener('click', () => shiftMonth(-1));
    document.getElementById('next-month').addEventListener('click', () => shiftMonth(1));

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        activeTab = button.dataset.tab;
        tabs.forEach((tab) => tab.classList.toggle('active', tab === button));
        renderChart();
      });
    });

    document.getElementById('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = event.target;
      const name = form.elements.name.value.trim();
      if (!name) {
        return;
      }
      post('/api/habits', {
        name,
        icon: form.elements.icon.value || null,
        goal: Number(form.elements.goal.value) || 30
      })
        .then(() => {
          form.reset();
          form.elements.goal.value = 30;
          return refresh();
        })
        .then(() => setStatus('Habit added', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
