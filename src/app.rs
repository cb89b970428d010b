use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    let selector = Paragraph::new(Line::from(Span::styled(
      self.state.selector_label(),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().title("Employee").borders(Borders::ALL));

    frame.render_widget(selector, layout[0]);

    let posts_area = layout[1];

    let view = self.state.view(
      usize::from(posts_area.width.saturating_sub(2)),
      usize::from(posts_area.height.saturating_sub(2)),
    );

    let scroll = u16::try_from(self.state.scroll()).unwrap_or(u16::MAX);

    let posts = Paragraph::new(view.into_lines())
      .block(Block::default().title("Posts").borders(Borders::ALL))
      .scroll((scroll, 0));

    frame.render_widget(posts, posts_area);

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    if self.state.help_is_visible() {
      Self::draw_help(frame);
    }
  }

  fn draw_help(frame: &mut Frame) {
    let lines = Action::help_lines();

    let width = lines
      .iter()
      .map(|line| line.chars().count())
      .max()
      .unwrap_or_default()
      + 2;

    let width = u16::try_from(width).unwrap_or(u16::MAX);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);

    let [area] = Layout::horizontal([Constraint::Length(width)])
      .flex(Flex::Center)
      .areas(frame.area());

    let [area] = Layout::vertical([Constraint::Length(height)])
      .flex(Flex::Center)
      .areas(area);

    let lines = lines.into_iter().map(Line::from).collect::<Vec<_>>();

    let help = Paragraph::new(lines)
      .block(Block::default().title(HELP_TITLE).borders(Borders::ALL))
      .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
  }

  pub(crate) fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          info!(%url, "opened post in browser");

          self
            .state
            .set_message(format!("Opened in browser: {}", truncate(&url, 80)));
        }
        Err(error) => {
          warn!(%url, %error, "could not open link");

          self
            .state
            .set_message(format!("Could not open link: {error}"));
        }
      },
      Effect::RenderSelection {
        page,
        request_id,
        value,
      } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let mut page = page;

          let selection = page
            .handle_selection_change(&client, Some(value.as_str()))
            .await;

          let _ = sender.send(Event::Rendered {
            page,
            posts: selection.posts.as_ref().map(Vec::len),
            request_id,
          });
        });
      }
    }
  }

  pub(crate) fn new(client: Client, state: State) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    }
  }

  fn process_pending_events(&mut self) {
    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let action = if self.state.help_is_visible() {
        Action::from_help_key(key)
      } else {
        Action::from_key(key)
      };

      let dispatch = self.state.dispatch(action);

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        break;
      }
    }

    Ok(())
  }
}
